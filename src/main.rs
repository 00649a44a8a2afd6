//! ctxdocs CLI entry point
//!
//! Parses arguments, installs logging, runs the command, and reports a
//! failure once as a user-friendly message before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use ctxdocs_cli::cli;
use ctxdocs_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = cli.build_config();
    config.init_logging();

    match cli.execute_with_config(config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
