//! Check operation - config validation and rollup planning.

use std::path::Path;

use dtsup_config::BuildOptions;
use dtsup_core::{PackageJson, display_relative};
use dtsup_rollup::DtsRollup;
use eyre::Result;

use super::{describe_plan, main_exports};
use crate::reports::{CheckReport, MissingStub};

/// Execute the check operation.
///
/// Resolves entries and plans every job without running any. Problems
/// with the entries or the emitted stubs end up in the report.
pub fn check(options: &BuildOptions, config_path: &Path) -> Result<CheckReport> {
    let package_type = PackageJson::load(&options.root)?.package_type();
    let mut report = CheckReport {
        config_path: config_path.to_path_buf(),
        enabled: options.dts.is_some(),
        package_type: package_type.as_str(),
        formats: Vec::new(),
        missing: Vec::new(),
        errors: Vec::new(),
    };
    if !report.enabled {
        return Ok(report);
    }

    let plan = main_exports(options).and_then(|exports| DtsRollup::new(options).plan(&exports));
    match plan {
        Ok(Some(plan)) => {
            report.formats = describe_plan(&plan, options);
            report.missing = plan
                .missing_stubs()
                .into_iter()
                .map(|job| MissingStub {
                    source: display_relative(&job.source, &options.root),
                    stub: display_relative(&job.stub, &options.root),
                })
                .collect();
        }
        Ok(None) => report.enabled = false,
        Err(err) => report.errors.push(err.to_string()),
    }

    Ok(report)
}
