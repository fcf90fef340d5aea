//! `dtsup.toml` parsing and validation.
//!
//! The config file describes the main build's entries and output formats and
//! whether (and for which entries) declaration files are rolled up.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod entry;
mod error;
mod file;
mod options;
mod parse;
mod validate;

pub use entry::{EntrySpec, is_glob};
pub use error::{Error, Result};
pub use file::DtsupToml;
pub use options::{BuildOptions, Config, DeclarationRequest, DtsOption, DtsTable};
pub use parse::parse_config;
