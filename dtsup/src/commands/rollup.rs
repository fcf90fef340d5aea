use std::path::PathBuf;

use clap::Args;
use dtsup_core::Format;
use eyre::Result;

use super::{cli_path, load_options};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RollupCommand {
    /// Path to dtsup.toml (defaults to ./dtsup.toml)
    #[arg(short, long, default_value = "dtsup.toml")]
    pub config: PathBuf,

    /// Output directory (overrides dtsup.toml setting)
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Output formats, comma separated (overrides dtsup.toml setting)
    #[arg(short, long, value_delimiter = ',')]
    pub format: Option<Vec<Format>>,

    /// Remove existing declaration files from the output directory first
    #[arg(long)]
    pub clean: bool,

    /// Show the planned declaration files without cleaning or running the engine
    #[arg(long)]
    pub dry_run: bool,
}

impl RollupCommand {
    /// Run the rollup command
    pub fn run(&self) -> Result<()> {
        let (_, mut options) = load_options(&self.config)?;

        if let Some(out_dir) = &self.out_dir {
            options = options.with_out_dir(cli_path(out_dir)?);
        }
        if let Some(formats) = &self.format {
            let mut unique = Vec::with_capacity(formats.len());
            for format in formats {
                if !unique.contains(format) {
                    unique.push(*format);
                }
            }
            options = options.with_formats(unique);
        }
        if self.clean {
            options = options.with_clean(true);
        }

        let report = ops::rollup(&options, self.dry_run)?;
        report.render(&mut TerminalOutput::new());

        if !report.succeeded() {
            std::process::exit(1);
        }
        Ok(())
    }
}
