//! Declaration file rollup.
//!
//! Given a build's resolved entries and the per-file declaration stubs the
//! compiler left in the scratch directory, this crate merges every entry's
//! reachable type signatures into one declaration file per output format:
//!
//! - [`resolve_declaration_entries`] turns a [`DeclarationRequest`] into the
//!   `{ output name -> source }` map declarations are produced for
//! - [`OutputTarget`] picks the output path and `.d.ts` / `.d.mts` / `.d.cts`
//!   extension for a format and package type
//! - [`Flattener`] runs a [`FlattenEngine`] (API Extractor by default) on one
//!   stub with a synthesized configuration
//! - [`DtsRollup`] drives the above for every format, cleaning stale
//!   declaration files first when asked
//!
//! [`DeclarationRequest`]: dtsup_config::DeclarationRequest

mod clean;
mod engine;
mod entry;
mod error;
mod extractor;
mod flatten;
mod output;
mod plan;
mod rollup;

pub use clean::{clean_declarations, stale_declarations};
pub use engine::{ApiExtractor, EngineReport, FlattenEngine, FlattenJob};
pub use entry::{EntryMap, expand_glob, resolve_declaration_entries, resolve_entries};
pub use error::{Result, RollupError, report_error};
pub use extractor::{CONFIG_FILE_NAME, ExtractorConfig, ExtractorConfigBuilder};
pub use flatten::Flattener;
pub use output::OutputTarget;
pub use plan::{FormatPlan, PlannedJob, RollupPlan};
pub use rollup::{DtsRollup, RollupOutcome, RollupSummary};
