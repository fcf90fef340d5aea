mod check;
mod clean;
mod completions;
mod rollup;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use clean::CleanCommand;
use completions::CompletionsCommand;
use dtsup_config::{BuildOptions, DtsupToml};
use eyre::{Context, Result};
use rollup::RollupCommand;

/// Extension trait for exiting on config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for dtsup_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "dtsup")]
#[command(version)]
#[command(about = "Roll up TypeScript declaration files per entry and output format")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Rollup(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Clean(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Roll up declaration files from the compiler's stubs
    Rollup(RollupCommand),

    /// Validate dtsup.toml and show the planned declaration files
    Check(CheckCommand),

    /// Remove declaration files from the output directory
    Clean(CleanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Open `config` and resolve it against the current directory.
fn load_options(config: &Path) -> Result<(DtsupToml, BuildOptions)> {
    let dtsup_toml = DtsupToml::open(config).unwrap_or_exit();
    let cwd = std::env::current_dir().wrap_err("Failed to read the current directory")?;
    let options = dtsup_toml.build_options(&cwd);
    Ok((dtsup_toml, options))
}

/// Resolve a command-line path against the current directory.
fn cli_path(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir().wrap_err("Failed to read the current directory")?;
    Ok(dtsup_core::to_absolute_path(path, &cwd))
}
