//! Rollup operation - declaration files from compiler stubs.

use std::path::PathBuf;

use dtsup_config::BuildOptions;
use dtsup_core::display_relative;
use dtsup_rollup::DtsRollup;
use eyre::Result;

use super::{describe_plan, main_exports};
use crate::reports::{RollupReport, RollupResult};

/// Execute the rollup operation.
///
/// With `dry_run` the jobs are only planned: nothing is cleaned and the
/// engine is never started.
pub fn rollup(options: &BuildOptions, dry_run: bool) -> Result<RollupReport> {
    if options.dts.is_none() {
        return Ok(RollupReport {
            result: RollupResult::Disabled,
        });
    }

    let rollup = DtsRollup::new(options);

    let result = if dry_run {
        match rollup.plan(&main_exports(options)?)? {
            Some(plan) => RollupResult::Planned {
                formats: describe_plan(&plan, options),
                clean: options.clean,
            },
            None => RollupResult::Disabled,
        }
    } else {
        let outcome = rollup.run_resolving(|| main_exports(options));
        match outcome.summary {
            Some(summary) => RollupResult::Completed {
                removed: relative(&summary.removed, options),
                written: relative(&summary.written, options),
                millis: outcome.duration.as_millis(),
            },
            None => RollupResult::Failed,
        }
    };

    Ok(RollupReport { result })
}

fn relative(paths: &[PathBuf], options: &BuildOptions) -> Vec<String> {
    paths
        .iter()
        .map(|path| display_relative(path, &options.root))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use dtsup_config::{DeclarationRequest, EntrySpec};
    use dtsup_core::Format;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_dry_run_plans_without_side_effects() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/index.ts"), "export {};\n").unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();
        fs::write(temp.path().join("dist/old.d.ts"), "").unwrap();

        let options = BuildOptions::new(temp.path())
            .with_entry(EntrySpec::Single("src/index.ts".into()))
            .with_formats(vec![Format::Esm, Format::Cjs])
            .with_clean(true);

        let report = rollup(&options, true).unwrap();

        match report.result {
            RollupResult::Planned { formats, clean } => {
                assert!(clean);
                let outputs: Vec<&str> = formats
                    .iter()
                    .flat_map(|f| f.files.iter().map(|file| file.output.as_str()))
                    .collect();
                assert_eq!(outputs, vec!["dist/index.d.mts", "dist/index.d.ts"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(temp.path().join("dist/old.d.ts").exists());
        assert!(!temp.path().join(".dtsup").exists());
    }

    #[test]
    fn test_disabled_rollup() {
        let temp = TempDir::new().unwrap();
        let options = BuildOptions::new(temp.path()).with_dts(None);

        let report = rollup(&options, false).unwrap();

        assert!(matches!(report.result, RollupResult::Disabled));
        assert!(report.succeeded());
    }

    #[test]
    fn test_own_entry_ignores_broken_main_entry() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/index.ts"), "export {};\n").unwrap();

        let options = BuildOptions::new(temp.path())
            .with_entry(EntrySpec::Single("src/gone.ts".into()))
            .with_dts(Some(DeclarationRequest {
                entry: Some(EntrySpec::Single("src/index.ts".into())),
            }));

        let report = rollup(&options, true).unwrap();

        match report.result {
            RollupResult::Planned { formats, .. } => {
                assert_eq!(formats[0].files[0].output, "dist/index.d.ts");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_broken_main_entry_fails_the_rollup() {
        let temp = TempDir::new().unwrap();
        let options =
            BuildOptions::new(temp.path()).with_entry(EntrySpec::Single("src/gone.ts".into()));

        let report = rollup(&options, false).unwrap();

        assert!(matches!(report.result, RollupResult::Failed));
        assert!(!report.succeeded());
    }

    #[test]
    fn test_failed_rollup_is_reported() {
        let temp = TempDir::new().unwrap();
        let options = BuildOptions::new(temp.path());

        let report = rollup(&options, false).unwrap();

        assert!(matches!(report.result, RollupResult::Failed));
    }
}
