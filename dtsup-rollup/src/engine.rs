//! The declaration-flattening engine seam.

use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{Result, RollupError};

/// One submission to the flattening engine.
///
/// Created fresh per entry per output format and dropped once the engine
/// returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenJob {
    /// Intermediate stub the engine starts from.
    pub input: PathBuf,
    /// Destination of the rolled-up declaration file.
    pub output: PathBuf,
    /// Ephemeral engine configuration describing this job.
    pub config_path: PathBuf,
}

/// What the engine reported for one job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub succeeded: bool,
    pub error_count: usize,
    pub warning_count: usize,
    /// Captured engine output, one line per message.
    pub messages: Vec<String>,
}

impl EngineReport {
    /// A clean run with no messages.
    pub fn success() -> Self {
        Self {
            succeeded: true,
            ..Self::default()
        }
    }
}

/// A declaration-flattening engine.
///
/// Implementations run synchronously and must write the rolled-up file at
/// `job.output` when they succeed. Given identical inputs they must produce
/// identical output.
pub trait FlattenEngine {
    /// Human-readable engine name used in messages.
    fn name(&self) -> &'static str;

    /// Run one job to completion.
    ///
    /// # Errors
    ///
    /// Returns an error only when the engine could not be run at all; a run
    /// that reports problems returns `Ok` with `succeeded == false`.
    fn flatten(&self, job: &FlattenJob) -> Result<EngineReport>;
}

const API_EXTRACTOR_PACKAGE: &str = "@microsoft/api-extractor";
const API_EXTRACTOR_INSTALL: &str = "npm install -D @microsoft/api-extractor";

/// Microsoft API Extractor, run through its command-line launcher.
#[derive(Debug, Clone)]
pub struct ApiExtractor {
    bin: PathBuf,
    project_folder: PathBuf,
}

impl ApiExtractor {
    /// Find the `api-extractor` launcher in `node_modules/.bin`, walking up from `project_folder`.
    pub fn locate(project_folder: &Path) -> Result<Self> {
        let launcher = if cfg!(windows) {
            "api-extractor.cmd"
        } else {
            "api-extractor"
        };

        project_folder
            .ancestors()
            .map(|dir| dir.join("node_modules").join(".bin").join(launcher))
            .find(|candidate| candidate.is_file())
            .map(|bin| Self {
                bin,
                project_folder: project_folder.to_path_buf(),
            })
            .ok_or(RollupError::EngineUnavailable {
                engine: API_EXTRACTOR_PACKAGE,
                install: API_EXTRACTOR_INSTALL,
            })
    }

    /// Path of the located launcher.
    pub fn bin(&self) -> &Path {
        &self.bin
    }
}

impl FlattenEngine for ApiExtractor {
    fn name(&self) -> &'static str {
        "API Extractor"
    }

    fn flatten(&self, job: &FlattenJob) -> Result<EngineReport> {
        let output = Command::new(&self.bin)
            .args(["run", "--local", "--verbose", "--config"])
            .arg(&job.config_path)
            .current_dir(&self.project_folder)
            .output()
            .map_err(|e| {
                tracing::debug!(target: "dts", "failed to start {}: {}", self.bin.display(), e);
                RollupError::EngineUnavailable {
                    engine: API_EXTRACTOR_PACKAGE,
                    install: API_EXTRACTOR_INSTALL,
                }
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let mut report = parse_output(stdout.lines().chain(stderr.lines()));
        report.succeeded = output.status.success();
        if !report.succeeded && report.error_count == 0 && report.warning_count == 0 {
            // Crashed before reporting anything; still one error.
            report.error_count = 1;
        }
        Ok(report)
    }
}

/// Collect API Extractor output into a report.
///
/// Counts come from the `completed with N errors and M warnings` summary when
/// the engine prints one, otherwise from the `Error:` / `Warning:` lines.
fn parse_output<'a>(lines: impl Iterator<Item = &'a str>) -> EngineReport {
    let mut report = EngineReport::default();
    let mut summary = None;
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let trimmed = line.trim_start();
        if let Some(counts) = parse_summary(trimmed) {
            summary = Some(counts);
        }
        if trimmed.starts_with("Error:") {
            report.error_count += 1;
            tracing::error!(target: "dts", "{}", trimmed);
        } else if trimmed.starts_with("Warning:") {
            report.warning_count += 1;
            tracing::warn!(target: "dts", "{}", trimmed);
        } else {
            tracing::debug!(target: "dts", "{}", trimmed);
        }
        report.messages.push(line.to_string());
    }
    if let Some((errors, warnings)) = summary {
        report.error_count = errors;
        report.warning_count = warnings;
    }
    report
}

fn parse_summary(line: &str) -> Option<(usize, usize)> {
    let rest = line.split_once("completed with ")?.1;
    let (errors, rest) = rest.split_once(" errors and ")?;
    let warnings = rest.split_whitespace().next()?;
    Some((errors.trim().parse().ok()?, warnings.parse().ok()?))
}
