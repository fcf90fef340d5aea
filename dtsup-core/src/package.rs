//! Host package metadata (`package.json`).

use std::path::Path;

use eyre::{Context, Result};
use serde::Deserialize;

/// Module system declared by the host package's `"type"` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageType {
    /// `"type": "module"`
    Module,
    /// `"type": "commonjs"` or no `"type"` field at all.
    #[default]
    CommonJs,
}

impl PackageType {
    /// Returns the `package.json` spelling of this module type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Module => "module",
            PackageType::CommonJs => "commonjs",
        }
    }
}

/// The subset of `package.json` the rollup cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    pub name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl PackageJson {
    /// Load `package.json` from `dir`.
    ///
    /// A directory without a `package.json` yields the default (CommonJS)
    /// package, matching how Node.js treats such a directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join("package.json");
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// The declared module type.
    pub fn package_type(&self) -> PackageType {
        match self.kind.as_deref() {
            Some("module") => PackageType::Module,
            _ => PackageType::CommonJs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_package_json_is_commonjs() {
        let temp = TempDir::new().unwrap();
        let pkg = PackageJson::load(temp.path()).unwrap();
        assert_eq!(pkg.package_type(), PackageType::CommonJs);
        assert!(pkg.name.is_none());
    }

    #[test]
    fn test_module_type() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{ "name": "lib", "type": "module", "version": "0.0.1" }"#,
        )
        .unwrap();

        let pkg = PackageJson::load(temp.path()).unwrap();
        assert_eq!(pkg.package_type(), PackageType::Module);
        assert_eq!(pkg.name.as_deref(), Some("lib"));
    }

    #[test]
    fn test_explicit_commonjs_type() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), r#"{ "type": "commonjs" }"#).unwrap();

        let pkg = PackageJson::load(temp.path()).unwrap();
        assert_eq!(pkg.package_type(), PackageType::CommonJs);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{ not json").unwrap();

        let err = PackageJson::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
