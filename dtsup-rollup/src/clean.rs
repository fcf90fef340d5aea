//! Removal of stale declaration files from the output directory.

use std::path::{Path, PathBuf};

use dtsup_core::{DTS_PATTERNS, matching_files, remove_files};

use crate::Result;

/// Declaration files under `out_dir` that a clean would remove.
pub fn stale_declarations(out_dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(matching_files(DTS_PATTERNS, out_dir)?)
}

/// Delete every `.d.ts`, `.d.mts` and `.d.cts` file under `out_dir`.
///
/// Other files are left alone. A missing `out_dir` is not an error.
pub fn clean_declarations(out_dir: &Path) -> Result<Vec<PathBuf>> {
    let removed = remove_files(DTS_PATTERNS, out_dir)?;
    for path in &removed {
        tracing::debug!(target: "dts", "removed {}", path.display());
    }
    Ok(removed)
}
