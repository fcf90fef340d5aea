//! Output module formats and the declaration extension table.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PackageType;

/// Module convention targeted by one build pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// ECMAScript modules (`import` / `export`)
    Esm,
    /// CommonJS (`require` / `module.exports`)
    Cjs,
}

impl Format {
    /// Returns the format identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Esm => "esm",
            Format::Cjs => "cjs",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "esm" | "es" | "module" => Ok(Format::Esm),
            "cjs" | "commonjs" => Ok(Format::Cjs),
            _ => Err(format!("unknown format '{}', expected 'esm' or 'cjs'", s)),
        }
    }
}

/// File extensions emitted for one (format, package type) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutExtension {
    /// Extension of the rolled-up declaration file, with the leading dot.
    pub dts: &'static str,
}

impl OutExtension {
    /// Look up the extension for a format under the host package's module type.
    ///
    /// | format | package type | extension |
    /// |---|---|---|
    /// | esm | module | `.d.ts` |
    /// | esm | commonjs | `.d.mts` |
    /// | cjs | module | `.d.cts` |
    /// | cjs | commonjs | `.d.ts` |
    pub fn for_target(format: Format, package_type: PackageType) -> Self {
        let dts = match (format, package_type) {
            (Format::Esm, PackageType::Module) => ".d.ts",
            (Format::Esm, PackageType::CommonJs) => ".d.mts",
            (Format::Cjs, PackageType::Module) => ".d.cts",
            (Format::Cjs, PackageType::CommonJs) => ".d.ts",
        };
        Self { dts }
    }
}
