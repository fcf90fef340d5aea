//! Flattening invoker: one stub in, one rolled-up declaration file out.

use std::path::Path;

use dtsup_core::GeneratedFile;
use eyre::Context;
use tempfile::TempDir;

use crate::{
    RollupError,
    engine::{FlattenEngine, FlattenJob},
    error::Result,
    extractor::ExtractorConfigBuilder,
};

/// Drives a [`FlattenEngine`] with a freshly synthesized configuration per job.
pub struct Flattener<'a> {
    engine: &'a dyn FlattenEngine,
    config: ExtractorConfigBuilder,
}

impl<'a> Flattener<'a> {
    pub fn new(engine: &'a dyn FlattenEngine, config: ExtractorConfigBuilder) -> Self {
        Self { engine, config }
    }

    /// Roll `stub` up into `output`.
    ///
    /// The configuration lives in a private directory that is removed when
    /// this call returns, whatever the outcome.
    pub fn flatten(&self, stub: &Path, output: &Path) -> Result<()> {
        let dir = TempDir::with_prefix("dtsup-")
            .wrap_err("failed to create a private directory for the engine configuration")?;

        let config = self.config.job(stub, output);
        let config_path = config.write(dir.path())?;

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }

        let job = FlattenJob {
            input: stub.to_path_buf(),
            output: output.to_path_buf(),
            config_path,
        };
        tracing::debug!(
            target: "dts",
            "{}: {} -> {}",
            self.engine.name(),
            job.input.display(),
            job.output.display()
        );

        let report = self.engine.flatten(&job)?;
        if !report.succeeded || report.error_count > 0 || report.warning_count > 0 {
            return Err(RollupError::FlattenFailed {
                engine: self.engine.name(),
                errors: report.error_count,
                warnings: report.warning_count,
                input: job.input,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs, path::PathBuf};

    use super::*;
    use crate::engine::EngineReport;

    struct Recording {
        jobs: RefCell<Vec<(FlattenJob, String)>>,
        report: EngineReport,
    }

    impl Recording {
        fn new(report: EngineReport) -> Self {
            Self {
                jobs: RefCell::new(Vec::new()),
                report,
            }
        }
    }

    impl FlattenEngine for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn flatten(&self, job: &FlattenJob) -> Result<EngineReport> {
            let config = fs::read_to_string(&job.config_path).unwrap();
            self.jobs.borrow_mut().push((job.clone(), config));
            Ok(self.report.clone())
        }
    }

    fn builder(root: &Path) -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new(root, root.join("tsconfig.json"))
    }

    #[test]
    fn test_config_removed_after_job() {
        let temp = tempfile::TempDir::new().unwrap();
        let engine = Recording::new(EngineReport::success());
        let flattener = Flattener::new(&engine, builder(temp.path()));

        let stub = temp.path().join(".dtsup/declaration/index.d.ts");
        let output = temp.path().join("dist/index.d.ts");
        flattener.flatten(&stub, &output).unwrap();

        let jobs = engine.jobs.borrow();
        assert_eq!(jobs.len(), 1);
        let (job, config) = &jobs[0];
        assert_eq!(job.input, stub);
        assert_eq!(job.output, output);
        assert!(config.contains("\"mainEntryPointFilePath\""));
        assert!(!job.config_path.exists());
        assert!(temp.path().join("dist").is_dir());
    }

    #[test]
    fn test_each_job_gets_its_own_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let engine = Recording::new(EngineReport::success());
        let flattener = Flattener::new(&engine, builder(temp.path()));

        flattener
            .flatten(&temp.path().join("a.d.ts"), &temp.path().join("dist/a.d.ts"))
            .unwrap();
        flattener
            .flatten(&temp.path().join("b.d.ts"), &temp.path().join("dist/b.d.ts"))
            .unwrap();

        let jobs = engine.jobs.borrow();
        let paths: Vec<&PathBuf> = jobs.iter().map(|(job, _)| &job.config_path).collect();
        assert_ne!(paths[0], paths[1]);
        assert!(jobs[0].1.contains("a.d.ts"));
        assert!(!jobs[0].1.contains("b.d.ts"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unrenderable_config_stops_the_job() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let temp = tempfile::TempDir::new().unwrap();
        let engine = Recording::new(EngineReport::success());
        let flattener = Flattener::new(&engine, builder(temp.path()));

        let stub = temp.path().join(OsStr::from_bytes(b"ind\xffex.d.ts"));
        let err = flattener
            .flatten(&stub, &temp.path().join("dist/index.d.ts"))
            .unwrap_err();

        assert!(matches!(err, RollupError::Filesystem(ref msg) if msg.contains("invalid UTF-8")));
        assert!(engine.jobs.borrow().is_empty());
    }

    #[test]
    fn test_warnings_fail_the_job() {
        let temp = tempfile::TempDir::new().unwrap();
        let engine = Recording::new(EngineReport {
            succeeded: true,
            error_count: 0,
            warning_count: 2,
            messages: Vec::new(),
        });
        let flattener = Flattener::new(&engine, builder(temp.path()));

        let stub = temp.path().join("index.d.ts");
        let err = flattener
            .flatten(&stub, &temp.path().join("dist/index.d.ts"))
            .unwrap_err();
        match err {
            RollupError::FlattenFailed {
                engine,
                errors,
                warnings,
                input,
            } => {
                assert_eq!(engine, "recording");
                assert_eq!(errors, 0);
                assert_eq!(warnings, 2);
                assert_eq!(input, stub);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
