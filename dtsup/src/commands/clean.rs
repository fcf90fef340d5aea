use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::{cli_path, load_options};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to dtsup.toml (defaults to ./dtsup.toml)
    #[arg(short, long, default_value = "dtsup.toml")]
    pub config: PathBuf,

    /// Output directory (overrides dtsup.toml setting)
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let (_, options) = load_options(&self.config)?;
        let out_dir = match &self.out_dir {
            Some(out_dir) => cli_path(out_dir)?,
            None => options.out_dir.clone(),
        };

        let report = ops::clean(ops::clean::CleanOptions {
            out_dir: &out_dir,
            root: &options.root,
            dry_run: self.dry_run,
        })?;

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
