//! Core utilities and types for the dtsup declaration rollup.
//!
//! This crate provides the fundamental types (output formats, package module
//! type, the declaration extension table) and the filesystem capabilities
//! shared across the dtsup crates.

mod file;
mod format;
mod package;
mod paths;
mod remove;
mod scratch;

// File operations
pub use file::GeneratedFile;
// Fundamental types
pub use format::{Format, OutExtension};
pub use package::{PackageJson, PackageType};
// Path utilities
pub use paths::{display_relative, normalize_path, to_absolute_path};
pub use remove::{DTS_PATTERNS, matching_files, remove_files};
pub use scratch::{DEFAULT_SCRATCH_DIR, ScratchDir, stub_file_name};
