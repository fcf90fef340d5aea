//! Check command report data structures.

use std::path::PathBuf;

use super::{
    output::{Output, Report},
    rollup::{PlannedFormat, render_plan},
};

/// A planned job whose stub the compiler has not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingStub {
    pub source: String,
    pub stub: String,
}

/// Report data from config validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// Whether declaration rollup is enabled.
    pub enabled: bool,
    /// Module type declared by `package.json`.
    pub package_type: &'static str,
    /// Planned declaration files per format.
    pub formats: Vec<PlannedFormat>,
    /// Stubs that must exist before a rollup can run.
    pub missing: Vec<MissingStub>,
    /// Entry resolution errors.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {}", error));
        }
        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        if !self.enabled {
            out.preformatted("Declaration rollup is disabled.");
            return;
        }

        out.key_value("package type", self.package_type);
        out.newline();
        render_plan(&self.formats, out);

        if !self.missing.is_empty() {
            out.newline();
            out.section("Missing stubs (run the compiler first)");
            for missing in &self.missing {
                out.list_item(&format!("{} (from {})", missing.stub, missing.source));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::{PlannedFile, output::BufferOutput};

    fn report() -> CheckReport {
        CheckReport {
            config_path: PathBuf::from("dtsup.toml"),
            enabled: true,
            package_type: "module",
            formats: vec![PlannedFormat {
                format: "cjs".into(),
                files: vec![PlannedFile {
                    stub: ".dtsup/declaration/index.d.ts".into(),
                    output: "dist/index.d.cts".into(),
                }],
            }],
            missing: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_render_valid() {
        let mut out = BufferOutput::default();
        report().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "✓ dtsup.toml is valid",
                "",
                "package type: module",
                "",
                "Format cjs:",
                "  - .dtsup/declaration/index.d.ts -> dist/index.d.cts",
            ]
        );
    }

    #[test]
    fn test_render_missing_stubs() {
        let mut report = report();
        report.missing.push(MissingStub {
            source: "src/index.ts".into(),
            stub: ".dtsup/declaration/index.d.ts".into(),
        });

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(report.is_valid());
        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("  - .dtsup/declaration/index.d.ts (from src/index.ts)")
        );
    }

    #[test]
    fn test_render_errors_only() {
        let mut report = report();
        report.errors.push("entry 'src/nope.ts' does not exist".into());

        let mut out = BufferOutput::default();
        report.render(&mut out);

        assert!(!report.is_valid());
        assert_eq!(
            out.lines,
            vec!["warning: error: entry 'src/nope.ts' does not exist"]
        );
    }
}
