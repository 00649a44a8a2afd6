//! Reconcile cached documentation with the declared dependencies.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use tracing::info;

use super::CliConfig;
use super::common::{CommandContext, load_global_config, print_actions};
use crate::fetch::{DocsClient, FetchCoordinator};
use crate::sync::{SyncOptions, SyncReport, run_sync};

#[derive(Debug, Args, Default)]
pub struct SyncCommand {
    /// Show the planned actions without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Regenerate documentation for every tracked framework
    #[arg(long)]
    force: bool,

    /// Maximum number of documentation requests in flight
    #[arg(long, value_name = "NUMBER")]
    max_parallel: Option<usize>,
}

impl SyncCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let mut ctx = CommandContext::load(config)?;
        let options = SyncOptions {
            dry_run: self.dry_run,
            force: self.force,
            show_progress: config.show_progress(),
        };
        sync_project(&mut ctx, config, options, self.max_parallel).await
    }
}

/// Run one sync pass over `ctx` and print its outcome.
///
/// # Errors
///
/// Fails on structural errors, and after saving when any framework could not
/// be synced.
pub async fn sync_project(
    ctx: &mut CommandContext,
    config: &CliConfig,
    options: SyncOptions,
    max_parallel: Option<usize>,
) -> Result<()> {
    let global = load_global_config(config).await?;
    let network = &global.network;

    let docs = DocsClient::new(&network.docs_url, network.api_key.clone(), network.timeout())?;
    let coordinator = FetchCoordinator::new(
        max_parallel.unwrap_or(network.max_concurrency),
        network.timeout(),
    );
    info!(
        "Syncing with up to {} concurrent requests",
        coordinator.max_concurrency()
    );

    let report = run_sync(&mut ctx.project, &ctx.templates, &docs, coordinator, options).await?;
    print_report(&report, options.dry_run);

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{failed} framework(s) could not be synced");
    }
    Ok(())
}

fn print_report(report: &SyncReport, dry_run: bool) {
    if report.plan.is_empty() {
        println!("{}", "Documentation is up to date".green());
    } else if dry_run {
        println!("{}", "Planned actions (dry run):".cyan());
        print_actions(&report.plan.actions);
    } else {
        println!("{}", "Applied actions:".cyan());
        print_actions(&report.plan.actions);
    }

    for applied in report.failures() {
        println!(
            "  {} {}: {}",
            "✗".red(),
            applied.action.framework,
            applied.error.as_deref().unwrap_or_default()
        );
    }

    let placeholders = report.placeholders();
    if placeholders > 0 {
        println!(
            "{} {} file(s) could not be fetched and were written as placeholders",
            "!".yellow(),
            placeholders
        );
    }

    let host = report.index.path.display();
    if dry_run {
        if report.index.changed {
            println!("{} would be updated", host);
        }
    } else if report.index.created {
        println!("{} Created {}", "✓".green(), host);
    } else if report.index.changed {
        println!("{} Updated {}", "✓".green(), host);
    }
}
