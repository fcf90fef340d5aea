//! The full set of flatten jobs of one rollup, computed before any runs.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use dtsup_core::{Format, PackageType, ScratchDir};

use crate::{EntryMap, OutputTarget, Result, RollupError};

/// One entry rolled up for one format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedJob {
    pub name: String,
    pub source: PathBuf,
    pub stub: PathBuf,
    pub output: PathBuf,
}

/// Every job of one output format, in entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPlan {
    pub target: OutputTarget,
    pub jobs: Vec<PlannedJob>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupPlan {
    formats: Vec<FormatPlan>,
}

impl RollupPlan {
    /// Pair every entry with every format.
    ///
    /// Fails if two jobs would write the same output file, or if two
    /// different sources would be rolled up from the same stub.
    pub fn build(
        entries: &EntryMap,
        formats: &[Format],
        package_type: PackageType,
        out_dir: &Path,
        scratch: &ScratchDir,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut stubs: HashMap<PathBuf, &PathBuf> = HashMap::new();
        let mut plans = Vec::with_capacity(formats.len());

        for &format in formats {
            let target = OutputTarget::new(format, package_type);
            let mut jobs = Vec::with_capacity(entries.len());

            for (name, source) in entries {
                let stub = scratch.stub_path(source).ok_or_else(|| {
                    RollupError::Configuration(format!(
                        "cannot derive a declaration stub name for '{}'",
                        source.display()
                    ))
                })?;
                let previous = stubs.insert(stub.clone(), source);
                if let Some(other) = previous.filter(|other| *other != source) {
                    return Err(RollupError::Configuration(format!(
                        "entries '{}' and '{}' share the declaration stub '{}'",
                        other.display(),
                        source.display(),
                        stub.display()
                    )));
                }
                let output = target.output_path(out_dir, name)?;
                if !seen.insert(output.clone()) {
                    return Err(RollupError::Internal(format!(
                        "two declaration jobs resolve to {}",
                        output.display()
                    )));
                }
                jobs.push(PlannedJob {
                    name: name.clone(),
                    source: source.clone(),
                    stub,
                    output,
                });
            }
            plans.push(FormatPlan { target, jobs });
        }

        Ok(Self { formats: plans })
    }

    pub fn formats(&self) -> &[FormatPlan] {
        &self.formats
    }

    /// Total number of flatten jobs.
    pub fn job_count(&self) -> usize {
        self.formats.iter().map(|plan| plan.jobs.len()).sum()
    }

    /// Jobs whose stub has not been emitted, one per stub.
    pub fn missing_stubs(&self) -> Vec<&PlannedJob> {
        let mut reported = HashSet::new();
        self.formats
            .iter()
            .flat_map(|plan| &plan.jobs)
            .filter(|job| !job.stub.is_file() && reported.insert(&job.stub))
            .collect()
    }

    /// Fail on the first missing stub.
    pub fn verify_stubs(&self) -> Result<()> {
        match self.missing_stubs().first() {
            Some(job) => Err(RollupError::MissingStub {
                source_path: job.source.clone(),
                stub: job.stub.clone(),
            }),
            None => Ok(()),
        }
    }
}
