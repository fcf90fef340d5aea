//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod output;
mod rollup;

pub use check::{CheckReport, MissingStub};
pub use clean::CleanReport;
pub use output::{Report, TerminalOutput};
pub use rollup::{PlannedFile, PlannedFormat, RollupReport, RollupResult};
