//! Clean operation - remove declaration files from the output directory.

use std::path::Path;

use dtsup_core::display_relative;
use dtsup_rollup::{clean_declarations, stale_declarations};
use eyre::{Context, Result};

use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Absolute output directory.
    pub out_dir: &'a Path,
    /// Paths in the report are shown relative to this directory.
    pub root: &'a Path,
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
pub fn clean(opts: CleanOptions) -> Result<CleanReport> {
    let files = if opts.dry_run {
        stale_declarations(opts.out_dir).wrap_err("Failed to preview clean")?
    } else {
        clean_declarations(opts.out_dir).wrap_err("Failed to remove declaration files")?
    };

    Ok(CleanReport {
        dry_run: opts.dry_run,
        out_dir: display_relative(opts.out_dir, opts.root),
        files: files
            .iter()
            .map(|path| display_relative(path, opts.root))
            .collect(),
    })
}
