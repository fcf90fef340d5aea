//! Clean command report data structures.

use super::output::{Output, Report};

/// Report data from removing declaration files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Output directory that was cleaned.
    pub out_dir: String,
    /// Removed (or would-be removed) files.
    pub files: Vec<String>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.files.is_empty() {
            out.preformatted(&format!("No declaration files in {}.", self.out_dir));
            return;
        }

        if self.dry_run {
            out.section("Would delete");
        } else {
            out.section("Deleted");
        }
        for path in &self.files {
            out.removed_item(path);
        }
    }
}
