//! Rebuild the host document block from the files on disk. No network.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::CommandContext;
use crate::index::refresh_host_document;

#[derive(Debug, Args, Default)]
pub struct IndexCommand {
    /// Report whether the block would change without writing it
    #[arg(long)]
    dry_run: bool,
}

impl IndexCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CommandContext::load(config)?;
        let outcome = refresh_host_document(&ctx.project, &ctx.templates, self.dry_run)?;
        let path = outcome.path.display();

        match (outcome.changed, self.dry_run) {
            (false, _) => println!("{} is up to date", path),
            (true, true) => println!("{} would be updated ({} sections)", path, outcome.sections),
            (true, false) if outcome.created => {
                println!("{} Created {} ({} sections)", "✓".green(), path, outcome.sections);
            }
            (true, false) => {
                println!("{} Updated {} ({} sections)", "✓".green(), path, outcome.sections);
            }
        }

        Ok(())
    }
}
