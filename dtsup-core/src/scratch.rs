//! Scratch directory holding the intermediate per-file declaration stubs.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};

use crate::to_absolute_path;

/// Default scratch location relative to the project root.
pub const DEFAULT_SCRATCH_DIR: &str = ".dtsup/declaration";

/// Handle to the scratch directory of one build invocation.
///
/// The stubs inside are written by the compiler before rollup begins and are
/// only read here. Dropping the handle leaves the directory in place: its
/// removal belongs to whoever cleans up after the whole build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Acquire the scratch directory at `dir` (resolved against `root`), creating it if needed.
    pub fn ensure(root: &Path, dir: impl AsRef<Path>) -> Result<Self> {
        let path = to_absolute_path(dir, root);
        std::fs::create_dir_all(&path)
            .wrap_err_with(|| format!("failed to create scratch directory {}", path.display()))?;
        Ok(Self { path })
    }

    /// Handle for the scratch directory at `dir` without touching the filesystem.
    pub fn locate(root: &Path, dir: impl AsRef<Path>) -> Self {
        Self {
            path: to_absolute_path(dir, root),
        }
    }

    /// Absolute path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the compiler leaves the stub for `source`.
    pub fn stub_path(&self, source: &Path) -> Option<PathBuf> {
        stub_file_name(source).map(|name| self.path.join(name))
    }
}

/// File name of the intermediate stub emitted for `source`.
///
/// `.mts` sources produce `.d.mts`, `.cts` sources produce `.d.cts`, and
/// everything else produces `.d.ts`.
pub fn stub_file_name(source: &Path) -> Option<String> {
    let stem = source.file_stem()?.to_str()?;
    let ext = match source.extension().and_then(|e| e.to_str()) {
        Some("mts") => ".d.mts",
        Some("cts") => ".d.cts",
        _ => ".d.ts",
    };
    Some(format!("{}{}", stem, ext))
}
