//! List the documentation templates available to the project.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::common::CommandContext;
use super::{CliConfig, OutputFormat};
use crate::config::FrameworkSource;
use crate::templates::TemplateRegistry;

#[derive(Debug, Args, Default)]
pub struct TemplatesCommand {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct TemplateRow {
    name: String,
    title: String,
    packages: Vec<String>,
    source: FrameworkSource,
    files: usize,
    /// `builtin` or `project`
    origin: &'static str,
    tracked: bool,
}

impl TemplatesCommand {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CommandContext::load(config)?;
        let builtin = TemplateRegistry::builtin()?;

        let rows: Vec<TemplateRow> = ctx
            .templates
            .iter()
            .map(|template| TemplateRow {
                name: template.name.clone(),
                title: template.title().to_string(),
                packages: template.packages.clone(),
                source: template.source(),
                files: template.file_count(),
                origin: if builtin.get(&template.name) == Some(template) {
                    "builtin"
                } else {
                    "project"
                },
                tracked: ctx.project.config.framework(&template.name).is_some(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
            OutputFormat::Table => {
                println!(
                    "{:<16} {:<18} {:<10} {:>5}  {:<8} {}",
                    "Template".bold(),
                    "Title".bold(),
                    "Source".bold(),
                    "Files".bold(),
                    "Origin".bold(),
                    "Packages".bold()
                );
                println!("{}", "─".repeat(80));
                for row in &rows {
                    let name = if row.tracked {
                        row.name.green()
                    } else {
                        row.name.normal()
                    };
                    println!(
                        "{:<16} {:<18} {:<10} {:>5}  {:<8} {}",
                        name,
                        row.title,
                        row.source.to_string(),
                        row.files,
                        row.origin,
                        row.packages.join(", ").bright_black()
                    );
                }
            }
        }

        Ok(())
    }
}
