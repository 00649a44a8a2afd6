//! Per-dependency documentation status. Reads local files only.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::{CommandContext, print_actions};
use super::{CliConfig, OutputFormat};
use crate::config::FrameworkState;
use crate::planner::{DependencyReport, DependencyStatus, PlanOptions, ReconciliationAction};
use crate::sync::plan_project;

#[derive(Debug, Args, Default)]
pub struct StatusCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct StatusOutput<'a> {
    dependencies: &'a [DependencyReport],
    frameworks: &'a [FrameworkState],
    pending: &'a [ReconciliationAction],
}

impl StatusCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CommandContext::load(config)?;
        let plan = plan_project(&ctx.project, &ctx.templates, PlanOptions::default())?;

        match self.format {
            OutputFormat::Json => {
                let output = StatusOutput {
                    dependencies: &plan.statuses,
                    frameworks: &ctx.project.config.frameworks,
                    pending: &plan.actions,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                display_statuses(&plan.statuses);
                display_frameworks(&ctx.project.config.frameworks);
                if plan.is_empty() {
                    println!("\n{}", "Documentation is up to date".green());
                } else {
                    println!("\n{}", "Pending actions (run `ctxdocs sync`):".cyan());
                    print_actions(&plan.actions);
                }
            }
        }

        Ok(())
    }
}

fn display_statuses(statuses: &[DependencyReport]) {
    println!(
        "{:<28} {:<12} {:<10} {:<10} {}",
        "Dependency".bold(),
        "Declared".bold(),
        "Major".bold(),
        "Recorded".bold(),
        "Status".bold()
    );
    println!("{}", "─".repeat(78));

    for report in statuses {
        let status = match report.status {
            DependencyStatus::UpToDate => report.status.to_string().green(),
            DependencyStatus::UpdateAvailable => report.status.to_string().yellow(),
            DependencyStatus::New => report.status.to_string().cyan(),
            DependencyStatus::VersionUnknown => report.status.to_string().red(),
            DependencyStatus::NotDocumented => report.status.to_string().bright_black(),
        };
        println!(
            "{:<28} {:<12} {:<10} {:<10} {}",
            report.name,
            report.version_spec,
            report.declared,
            report.recorded.as_deref().unwrap_or("-"),
            status
        );
    }
}

fn display_frameworks(frameworks: &[FrameworkState]) {
    if frameworks.is_empty() {
        println!("\n{}", "No documentation has been generated yet".bright_black());
        return;
    }

    println!("\n{}", "Tracked frameworks:".bold());
    for state in frameworks {
        println!(
            "  {:<20} {:<8} {:<10} {:>3} files  {}",
            state.name,
            state.version,
            state.source,
            state.file_count,
            state.updated_at.format("%Y-%m-%d %H:%M UTC").to_string().bright_black()
        );
    }
}
