//! The rollup orchestrator.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use dtsup_config::{BuildOptions, DeclarationRequest};
use dtsup_core::{PackageJson, ScratchDir};

use crate::{
    EntryMap, Result, RollupError,
    clean::clean_declarations,
    engine::{ApiExtractor, FlattenEngine},
    entry::resolve_declaration_entries,
    error::report_error,
    extractor::ExtractorConfigBuilder,
    flatten::Flattener,
    plan::RollupPlan,
};

/// Files touched by a completed rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupSummary {
    /// Stale declaration files removed by the pre-rollup clean.
    pub removed: Vec<PathBuf>,
    /// Declaration files written, in job order.
    pub written: Vec<PathBuf>,
}

/// Result of [`DtsRollup::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupOutcome {
    /// `None` when the rollup failed; the error has already been reported.
    pub summary: Option<RollupSummary>,
    pub duration: Duration,
}

impl RollupOutcome {
    pub fn succeeded(&self) -> bool {
        self.summary.is_some()
    }
}

/// Declaration rollup for one build.
///
/// ```no_run
/// use dtsup_config::BuildOptions;
/// use dtsup_rollup::{DtsRollup, EntryMap};
///
/// let options = BuildOptions::new("/path/to/project");
/// let exports = EntryMap::from([("index".to_string(), "/path/to/project/src/index.ts".into())]);
/// let outcome = DtsRollup::new(&options).run(Some(&exports));
/// assert!(outcome.succeeded());
/// ```
pub struct DtsRollup {
    options: BuildOptions,
    engine: Option<Box<dyn FlattenEngine>>,
}

impl DtsRollup {
    /// Rollup driven by API Extractor, located when the first job is about to run.
    pub fn new(options: &BuildOptions) -> Self {
        Self {
            options: options.clone(),
            engine: None,
        }
    }

    /// Use `engine` instead of API Extractor.
    pub fn with_engine(mut self, engine: impl FlattenEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the rollup, reporting any failure instead of returning it.
    ///
    /// `exports` is the main build's resolved entry set; it must be present
    /// whenever declaration rollup is enabled.
    pub fn run(&self, exports: Option<&EntryMap>) -> RollupOutcome {
        self.report(|| self.try_run(exports))
    }

    /// Like [`run`](Self::run), but resolves the main build's entries first.
    ///
    /// A failure in `resolve` is reported like any other rollup failure.
    pub fn run_resolving<F>(&self, resolve: F) -> RollupOutcome
    where
        F: FnOnce() -> Result<EntryMap>,
    {
        self.report(|| {
            let exports = resolve()?;
            self.try_run(Some(&exports))
        })
    }

    fn report<F>(&self, rollup: F) -> RollupOutcome
    where
        F: FnOnce() -> Result<RollupSummary>,
    {
        if self.options.dts.is_none() {
            tracing::debug!(target: "dts", "declaration rollup disabled");
            return RollupOutcome {
                summary: Some(RollupSummary::default()),
                duration: Duration::ZERO,
            };
        }

        tracing::info!(target: "dts", "Build start");
        let start = Instant::now();

        match rollup() {
            Ok(summary) => {
                let duration = start.elapsed();
                tracing::info!(target: "dts", "Build success in {}ms", duration.as_millis());
                RollupOutcome {
                    summary: Some(summary),
                    duration,
                }
            }
            Err(err) => {
                let duration = start.elapsed();
                let stage = err.stage();
                report_error(err);
                tracing::error!(
                    target: "dts",
                    stage,
                    elapsed_ms = duration.as_millis() as u64,
                    "Build error"
                );
                RollupOutcome {
                    summary: None,
                    duration,
                }
            }
        }
    }

    /// Run the rollup and return the first failure.
    pub fn try_run(&self, exports: Option<&EntryMap>) -> Result<RollupSummary> {
        let Some(request) = &self.options.dts else {
            return Ok(RollupSummary::default());
        };
        let exports = exports.ok_or_else(|| {
            RollupError::Internal("declaration rollup started without the export list".to_string())
        })?;

        let removed = if self.options.clean {
            clean_declarations(&self.options.out_dir)?
        } else {
            Vec::new()
        };

        let scratch = ScratchDir::ensure(&self.options.root, &self.options.scratch_dir)?;
        let plan = self.plan_with(request, exports, &scratch)?;
        plan.verify_stubs()?;

        let located;
        let engine: &dyn FlattenEngine = match &self.engine {
            Some(engine) => engine.as_ref(),
            None => {
                located = ApiExtractor::locate(&self.options.root)?;
                &located
            }
        };
        let flattener = Flattener::new(
            engine,
            ExtractorConfigBuilder::new(&self.options.root, &self.options.tsconfig),
        );

        let mut written = Vec::with_capacity(plan.job_count());
        for format_plan in plan.formats() {
            tracing::debug!(
                target: "dts",
                format = format_plan.target.format.as_str(),
                jobs = format_plan.jobs.len(),
                "rolling up declarations"
            );
            for job in &format_plan.jobs {
                flattener.flatten(&job.stub, &job.output)?;
                written.push(job.output.clone());
            }
        }

        Ok(RollupSummary { removed, written })
    }

    /// Compute the jobs a run would execute, without touching the filesystem.
    ///
    /// Returns `None` when declaration rollup is disabled.
    pub fn plan(&self, exports: &EntryMap) -> Result<Option<RollupPlan>> {
        let Some(request) = &self.options.dts else {
            return Ok(None);
        };
        let scratch = ScratchDir::locate(&self.options.root, &self.options.scratch_dir);
        self.plan_with(request, exports, &scratch).map(Some)
    }

    fn plan_with(
        &self,
        request: &DeclarationRequest,
        exports: &EntryMap,
        scratch: &ScratchDir,
    ) -> Result<RollupPlan> {
        let entries = resolve_declaration_entries(request, exports, &self.options.root)?;
        let package_type = PackageJson::load(&self.options.root)?.package_type();

        RollupPlan::build(
            &entries,
            &self.options.formats,
            package_type,
            &self.options.out_dir,
            scratch,
        )
    }
}
