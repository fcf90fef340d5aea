//! Ephemeral API Extractor project configuration.
//!
//! The engine only understands one project layout, so instead of reading the
//! user's own `api-extractor.json` a fresh configuration is synthesized for
//! every flatten job: the entry points at the intermediate stub, every report
//! and model feature is off, and only the declaration rollup is on.

use std::path::{Path, PathBuf};

use dtsup_core::GeneratedFile;
use eyre::Context;
use serde::Serialize;

/// File name of the configuration inside its private directory.
pub const CONFIG_FILE_NAME: &str = "api-extractor.json";

/// Required by the engine even when API reports are disabled; never written.
const REPORT_FILE_NAME: &str = "dtsup-report.api.md";

/// Build-level settings shared by every job; produces one config per job.
#[derive(Debug, Clone)]
pub struct ExtractorConfigBuilder {
    project_folder: PathBuf,
    tsconfig: PathBuf,
}

impl ExtractorConfigBuilder {
    pub fn new(project_folder: impl Into<PathBuf>, tsconfig: impl Into<PathBuf>) -> Self {
        Self {
            project_folder: project_folder.into(),
            tsconfig: tsconfig.into(),
        }
    }

    /// Configuration rolling `stub` up into `output`.
    pub fn job(&self, stub: &Path, output: &Path) -> ExtractorConfig {
        ExtractorConfig {
            main_entry_point_file_path: stub.to_path_buf(),
            api_report: ApiReport {
                enabled: false,
                report_file_name: REPORT_FILE_NAME,
            },
            doc_model: Toggle { enabled: false },
            dts_rollup: DtsRollup {
                enabled: true,
                untrimmed_file_path: output.to_path_buf(),
            },
            tsdoc_metadata: Toggle { enabled: false },
            compiler: Compiler {
                tsconfig_file_path: self.tsconfig.clone(),
            },
            project_folder: self.project_folder.clone(),
            newline_kind: "lf",
        }
    }
}

/// A complete engine configuration for one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractorConfig {
    main_entry_point_file_path: PathBuf,
    api_report: ApiReport,
    doc_model: Toggle,
    dts_rollup: DtsRollup,
    tsdoc_metadata: Toggle,
    compiler: Compiler,
    project_folder: PathBuf,
    newline_kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiReport {
    enabled: bool,
    report_file_name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Toggle {
    enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct DtsRollup {
    enabled: bool,
    untrimmed_file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Compiler {
    tsconfig_file_path: PathBuf,
}

impl ExtractorConfig {
    /// The stub the engine starts from.
    pub fn entry(&self) -> &Path {
        &self.main_entry_point_file_path
    }

    /// Where the rolled-up declaration file is written.
    pub fn output(&self) -> &Path {
        &self.dts_rollup.untrimmed_file_path
    }

    /// Pretty-printed JSON.
    ///
    /// Fails when a path is not valid UTF-8.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl GeneratedFile for ExtractorConfig {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(CONFIG_FILE_NAME)
    }

    fn render(&self) -> eyre::Result<String> {
        let json = self.to_json().wrap_err_with(|| {
            format!(
                "failed to render the API Extractor configuration for {}",
                self.entry().display()
            )
        })?;
        Ok(format!("{json}\n"))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample() -> ExtractorConfig {
        ExtractorConfigBuilder::new("/project", "/project/tsconfig.json").job(
            Path::new("/project/.dtsup/declaration/index.d.ts"),
            Path::new("/project/dist/index.d.cts"),
        )
    }

    #[test]
    fn test_rendered_config() {
        insta::assert_snapshot!(sample().to_json().unwrap(), @r#"
        {
          "mainEntryPointFilePath": "/project/.dtsup/declaration/index.d.ts",
          "apiReport": {
            "enabled": false,
            "reportFileName": "dtsup-report.api.md"
          },
          "docModel": {
            "enabled": false
          },
          "dtsRollup": {
            "enabled": true,
            "untrimmedFilePath": "/project/dist/index.d.cts"
          },
          "tsdocMetadata": {
            "enabled": false
          },
          "compiler": {
            "tsconfigFilePath": "/project/tsconfig.json"
          },
          "projectFolder": "/project",
          "newlineKind": "lf"
        }
        "#);
    }

    #[test]
    fn test_jobs_do_not_share_state() {
        let builder = ExtractorConfigBuilder::new("/project", "/project/tsconfig.json");
        let first = builder.job(Path::new("/s/a.d.ts"), Path::new("/o/a.d.ts"));
        let second = builder.job(Path::new("/s/b.d.ts"), Path::new("/o/b.d.ts"));

        assert_eq!(first.entry(), Path::new("/s/a.d.ts"));
        assert_eq!(second.entry(), Path::new("/s/b.d.ts"));
        assert_eq!(first.output(), Path::new("/o/a.d.ts"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_write_to_private_dir() {
        let temp = TempDir::new().unwrap();
        let path = sample().write(temp.path()).unwrap();

        assert_eq!(path, temp.path().join(CONFIG_FILE_NAME));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["dtsRollup"]["enabled"], true);
        assert_eq!(value["newlineKind"], "lf");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_an_error() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let temp = TempDir::new().unwrap();
        let stub = Path::new("/project").join(OsStr::from_bytes(b"ind\xffex.d.ts"));
        let config = ExtractorConfigBuilder::new("/project", "/project/tsconfig.json")
            .job(&stub, Path::new("/project/dist/index.d.ts"));

        assert!(config.to_json().is_err());
        let err = config.write(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid UTF-8"), "{err:#}");
        assert!(!temp.path().join(CONFIG_FILE_NAME).exists());
    }
}
