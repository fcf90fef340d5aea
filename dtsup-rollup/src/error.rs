use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for rollup operations.
pub type Result<T> = std::result::Result<T, RollupError>;

/// Everything that can stop a declaration rollup.
///
/// None of these are retried: the rollup has no transient failure sources.
#[derive(Debug, Error, Diagnostic)]
pub enum RollupError {
    /// The entry specification cannot be turned into a usable entry set.
    #[error("{0}")]
    #[diagnostic(code(dtsup::configuration))]
    Configuration(String),

    /// The compiler did not leave a stub where one was expected.
    #[error("no declaration stub for '{}' (expected '{}')", .source_path.display(), .stub.display())]
    #[diagnostic(
        code(dtsup::missing_stub),
        help("emit per-file declarations into the scratch directory before rolling up")
    )]
    MissingStub { source_path: PathBuf, stub: PathBuf },

    /// The flattening engine could not be found or started.
    #[error("{engine} is not installed")]
    #[diagnostic(code(dtsup::engine_unavailable), help("install it first: {install}"))]
    EngineUnavailable {
        engine: &'static str,
        install: &'static str,
    },

    /// The flattening engine ran and reported problems.
    #[error(
        "{engine} completed with {errors} errors and {warnings} warnings when processing {}",
        .input.display()
    )]
    #[diagnostic(code(dtsup::flatten_failed))]
    FlattenFailed {
        engine: &'static str,
        errors: usize,
        warnings: usize,
        input: PathBuf,
    },

    /// An invariant of the rollup itself was violated.
    #[error("unexpected internal error: {0}")]
    #[diagnostic(code(dtsup::internal))]
    Internal(String),

    /// Reading or writing the filesystem failed.
    #[error("{0}")]
    #[diagnostic(code(dtsup::filesystem))]
    Filesystem(String),
}

impl RollupError {
    /// Stage tag used when logging this error.
    pub fn stage(&self) -> &'static str {
        match self {
            RollupError::Configuration(_) | RollupError::MissingStub { .. } => "resolve",
            RollupError::EngineUnavailable { .. } | RollupError::FlattenFailed { .. } => "flatten",
            RollupError::Internal(_) => "internal",
            RollupError::Filesystem(_) => "filesystem",
        }
    }
}

impl From<eyre::Report> for RollupError {
    fn from(report: eyre::Report) -> Self {
        RollupError::Filesystem(format!("{:#}", report))
    }
}

impl From<std::io::Error> for RollupError {
    fn from(err: std::io::Error) -> Self {
        RollupError::Filesystem(err.to_string())
    }
}

/// Print an error with its diagnostic help to stderr.
pub fn report_error(err: RollupError) {
    eprintln!("{:?}", miette::Report::new(err));
}
