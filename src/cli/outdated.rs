//! Freshness check: recorded documentation versions against the latest
//! releases published to the package registry.
//!
//! Each tracked framework is looked up through the package that declares it.
//! Lookups run through the [`FetchCoordinator`], so a slow or failing
//! registry answer only marks its own row as unknown (`?`).

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info};

use super::common::{CommandContext, load_global_config};
use super::{CliConfig, OutputFormat};
use crate::config::FrameworkState;
use crate::constants::PACKAGE_MANIFEST_NAME;
use crate::fetch::{FetchCoordinator, NpmRegistry, VersionSource};
use crate::manifest::{DependencyRecord, PackageManifest};
use crate::planner::primary_dependency;
use crate::utils::progress::ProgressBar;
use crate::version::{compare_tokens, normalize_major, release_token};

#[derive(Debug, Args, Default)]
pub struct OutdatedCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Exit with status 1 if any documentation is older than the latest release
    #[arg(long)]
    check: bool,

    /// Maximum number of registry requests in flight
    #[arg(long, value_name = "NUMBER")]
    max_parallel: Option<usize>,
}

/// Freshness of one tracked framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedInfo {
    pub framework: String,
    pub package: String,
    /// Major token of the declared version
    pub declared: String,
    /// Major token the documentation was generated for
    pub recorded: String,
    /// Latest published version; `None` if the lookup failed or the
    /// package is not published
    pub latest: Option<String>,
    pub stale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutdatedSummary {
    pub total: usize,
    pub stale: usize,
    pub unknown: usize,
    pub up_to_date: usize,
}

#[derive(Debug, Serialize)]
struct OutdatedResult {
    frameworks: Vec<OutdatedInfo>,
    summary: OutdatedSummary,
}

impl OutdatedCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        info!("Checking documentation freshness");

        let ctx = CommandContext::load(config)?;
        let manifest = PackageManifest::load(&ctx.project.root.join(PACKAGE_MANIFEST_NAME))?;
        let dependencies = manifest.dependency_records(&ctx.templates);
        let tracked = tracked_packages(&ctx.project.config.frameworks, &dependencies);

        let global = load_global_config(config).await?;
        let network = &global.network;
        let registry = NpmRegistry::new(&network.registry_url, network.timeout())?;

        let packages: Vec<String> =
            tracked.iter().map(|(_, dep)| dep.name.clone()).collect();
        let progress = ProgressBar::new(packages.len() as u64, config.show_progress());
        progress.set_message("Checking registry");
        let coordinator = FetchCoordinator::new(
            self.max_parallel.unwrap_or(network.max_concurrency),
            network.timeout(),
        )
        .with_progress(progress.clone());

        let registry = &registry;
        let latest = coordinator
            .run(packages, |package: String| async move {
                registry.latest_version(&package).await
            })
            .await;
        progress.finish_and_clear();

        let rows = compare(&tracked, &latest);
        let summary = summarize(&rows);

        match self.format {
            OutputFormat::Json => {
                let result = OutdatedResult {
                    frameworks: rows.clone(),
                    summary: summary.clone(),
                };
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Table => display_table(&rows, &summary),
        }

        if self.check && summary.stale > 0 {
            std::process::exit(1);
        }

        Ok(())
    }
}

/// Pair each recorded framework with the dependency governing its version.
fn tracked_packages<'a>(
    frameworks: &'a [FrameworkState],
    dependencies: &'a [DependencyRecord],
) -> Vec<(&'a FrameworkState, &'a DependencyRecord)> {
    frameworks
        .iter()
        .filter_map(|state| {
            let dep = primary_dependency(dependencies, &state.name);
            if dep.is_none() {
                debug!("{} is no longer declared, skipping", state.name);
            }
            dep.map(|dep| (state, dep))
        })
        .collect()
}

fn compare(
    tracked: &[(&FrameworkState, &DependencyRecord)],
    latest: &HashMap<String, Option<Option<String>>>,
) -> Vec<OutdatedInfo> {
    tracked
        .iter()
        .map(|(state, dep)| {
            let latest = latest.get(&dep.name).cloned().flatten().flatten();
            let stale = latest
                .as_deref()
                .and_then(release_token)
                .and_then(|token| compare_tokens(&token, &state.version))
                .is_some_and(|ordering| ordering == Ordering::Greater);

            OutdatedInfo {
                framework: state.name.clone(),
                package: dep.name.clone(),
                declared: normalize_major(&dep.version_spec),
                recorded: state.version.clone(),
                latest,
                stale,
            }
        })
        .collect()
}

fn summarize(rows: &[OutdatedInfo]) -> OutdatedSummary {
    let stale = rows.iter().filter(|r| r.stale).count();
    let unknown = rows.iter().filter(|r| r.latest.is_none()).count();
    OutdatedSummary {
        total: rows.len(),
        stale,
        unknown,
        up_to_date: rows.len() - stale - unknown,
    }
}

fn display_table(rows: &[OutdatedInfo], summary: &OutdatedSummary) {
    if rows.is_empty() {
        println!("{}", "No documented frameworks to check".bright_black());
        return;
    }

    println!(
        "\n{:<20} {:<28} {:<10} {:<10} {:<12}",
        "Framework".bold(),
        "Package".bold(),
        "Declared".bold(),
        "Recorded".bold(),
        "Latest".bold()
    );
    println!("{}", "─".repeat(84));

    for row in rows {
        let name = if row.stale {
            row.framework.yellow()
        } else {
            row.framework.normal()
        };
        let latest = match &row.latest {
            Some(version) if row.stale => version.cyan(),
            Some(version) => version.normal(),
            None => "?".red(),
        };
        println!(
            "{:<20} {:<28} {:<10} {:<10} {:<12}",
            name, row.package, row.declared, row.recorded, latest
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total frameworks: {}", summary.total);
    if summary.stale > 0 {
        println!(
            "  {} framework(s) documented for an older major version; run {}",
            summary.stale.to_string().yellow(),
            "ctxdocs sync".bright_white()
        );
    }
    if summary.unknown > 0 {
        println!("  {} lookup(s) failed", summary.unknown.to_string().red());
    }
    println!("  {} up to date", summary.up_to_date.to_string().green());
}
