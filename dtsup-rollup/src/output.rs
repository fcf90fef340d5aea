//! Output path resolution.

use std::path::{Path, PathBuf};

use dtsup_core::{Format, OutExtension, PackageType, normalize_path};

use crate::{Result, RollupError};

/// One output format paired with the host package's module type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputTarget {
    pub format: Format,
    pub package_type: PackageType,
}

impl OutputTarget {
    pub fn new(format: Format, package_type: PackageType) -> Self {
        Self {
            format,
            package_type,
        }
    }

    /// Extension of the rolled-up declaration file.
    pub fn dts_extension(&self) -> &'static str {
        OutExtension::for_target(self.format, self.package_type).dts
    }

    /// Absolute destination of the declaration file for `name` under `out_dir`.
    ///
    /// Fails if `name` would place the file outside `out_dir`.
    pub fn output_path(&self, out_dir: &Path, name: &str) -> Result<PathBuf> {
        let out_dir = normalize_path(out_dir);
        let path = normalize_path(&out_dir.join(format!("{}{}", name, self.dts_extension())));
        if !path.starts_with(&out_dir) {
            return Err(RollupError::Configuration(format!(
                "output name '{}' escapes the output directory '{}'",
                name,
                out_dir.display()
            )));
        }
        Ok(path)
    }
}
