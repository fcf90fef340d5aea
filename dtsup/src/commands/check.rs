use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::load_options;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to dtsup.toml (defaults to ./dtsup.toml)
    #[arg(short, long, default_value = "dtsup.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let (dtsup_toml, options) = load_options(&self.config)?;

        let report = ops::check(&options, dtsup_toml.path())?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
