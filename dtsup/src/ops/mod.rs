//! Core operations.
//!
//! This module contains the business logic for dtsup commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod rollup;

pub use check::check;
pub use clean::clean;
pub use rollup::rollup;

use dtsup_config::BuildOptions;
use dtsup_core::display_relative;
use dtsup_rollup::{EntryMap, RollupPlan, resolve_entries};

use crate::reports::{PlannedFile, PlannedFormat};

/// Entries of the main build, as the bundler would resolve them.
///
/// A config without `entry` has no main entries; declaration rollup then
/// needs its own `[dts] entry`. When `[dts] entry` is set the main entries
/// are never used, so they are not resolved either.
fn main_exports(options: &BuildOptions) -> dtsup_rollup::Result<EntryMap> {
    let own_entry = options
        .dts
        .as_ref()
        .is_some_and(|request| request.entry.is_some());
    match &options.entry {
        Some(spec) if !own_entry => resolve_entries(spec, &options.root),
        _ => Ok(EntryMap::new()),
    }
}

/// Describe `plan` with paths relative to the project root.
fn describe_plan(plan: &RollupPlan, options: &BuildOptions) -> Vec<PlannedFormat> {
    plan.formats()
        .iter()
        .map(|format_plan| PlannedFormat {
            format: format_plan.target.format.to_string(),
            files: format_plan
                .jobs
                .iter()
                .map(|job| PlannedFile {
                    stub: display_relative(&job.stub, &options.root),
                    output: display_relative(&job.output, &options.root),
                })
                .collect(),
        })
        .collect()
}
