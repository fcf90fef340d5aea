//! Pattern-based file removal under a root directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

/// Patterns matching every declaration file flavour.
pub const DTS_PATTERNS: &[&str] = &["**/*.d.{ts,mts,cts}"];

/// Collect files under `root` whose root-relative path matches any pattern.
///
/// Returns an empty list when `root` does not exist. Results are sorted.
pub fn matching_files(patterns: &[&str], root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let set = build_globset(patterns)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.wrap_err_with(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if set.is_match(rel) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Delete files under `root` matching any of `patterns`.
///
/// Returns the deleted paths, sorted.
pub fn remove_files(patterns: &[&str], root: &Path) -> Result<Vec<PathBuf>> {
    let files = matching_files(patterns, root)?;
    for file in &files {
        std::fs::remove_file(file)
            .wrap_err_with(|| format!("failed to remove {}", file.display()))?;
    }
    Ok(files)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .wrap_err_with(|| format!("invalid glob pattern '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().wrap_err("failed to compile glob patterns")
}
