//! Rollup command report data structures.

use super::output::{Output, Report};

/// One planned declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Intermediate stub, relative to the project root.
    pub stub: String,
    /// Output file, relative to the project root.
    pub output: String,
}

/// Planned declaration files of one output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFormat {
    pub format: String,
    pub files: Vec<PlannedFile>,
}

/// Report data from a rollup.
#[derive(Debug)]
pub struct RollupReport {
    pub result: RollupResult,
}

/// What the rollup did.
#[derive(Debug)]
pub enum RollupResult {
    /// Declaration rollup is turned off in the config.
    Disabled,
    /// Dry run: the jobs that would run.
    Planned {
        formats: Vec<PlannedFormat>,
        clean: bool,
    },
    /// Every job ran.
    Completed {
        removed: Vec<String>,
        written: Vec<String>,
        millis: u128,
    },
    /// The rollup failed; the error was already reported.
    Failed,
}

impl RollupReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self.result, RollupResult::Failed)
    }
}

/// Render the planned files of each format.
pub(crate) fn render_plan(formats: &[PlannedFormat], out: &mut dyn Output) {
    for (index, plan) in formats.iter().enumerate() {
        if index > 0 {
            out.newline();
        }
        out.section(&format!("Format {}", plan.format));
        for file in &plan.files {
            out.list_item(&format!("{} -> {}", file.stub, file.output));
        }
    }
}

impl Report for RollupReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            RollupResult::Disabled => {
                out.preformatted("Declaration rollup is disabled (set `dts = true` in dtsup.toml).");
            }
            RollupResult::Planned { formats, clean } => {
                if *clean {
                    out.preformatted("Would remove existing declaration files first.");
                    out.newline();
                }
                render_plan(formats, out);
                out.newline();
                let count: usize = formats.iter().map(|f| f.files.len()).sum();
                out.preformatted(&format!(
                    "{} declaration file{} would be written",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            RollupResult::Completed {
                removed,
                written,
                millis,
            } => {
                if !removed.is_empty() {
                    out.section("Removed");
                    for path in removed {
                        out.removed_item(path);
                    }
                    out.newline();
                }
                out.section("Written");
                for path in written {
                    out.added_item(path);
                }
                out.newline();
                out.preformatted(&format!(
                    "{} declaration file{} in {}ms",
                    written.len(),
                    if written.len() == 1 { "" } else { "s" },
                    millis
                ));
            }
            RollupResult::Failed => {}
        }
    }
}
