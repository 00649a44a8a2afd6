//! Shared plumbing for command implementations.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use super::CliConfig;
use crate::config::{GlobalConfig, Project, find_project_root};
use crate::planner::{ActionKind, ReconciliationAction};
use crate::templates::TemplateRegistry;

/// A loaded project together with the templates available to it.
#[derive(Debug)]
pub struct CommandContext {
    pub project: Project,
    pub templates: TemplateRegistry,
}

impl CommandContext {
    /// Find and load the project the command operates on.
    ///
    /// # Errors
    ///
    /// Fails if no `ctxdocs.toml` is found at or above the start directory, or
    /// if the configuration or a project template is malformed.
    pub fn load(config: &CliConfig) -> Result<Self> {
        let start = start_dir(config)?;
        let root = find_project_root(&start)?;
        debug!("Using project at {}", root.display());

        let project = Project::load(&root)?;
        let templates = TemplateRegistry::load(&project.templates_dir())
            .with_context(|| format!("Failed to load templates for {}", root.display()))?;

        Ok(Self {
            project,
            templates,
        })
    }
}

/// Directory the project search starts from.
///
/// # Errors
///
/// Fails only if the current directory cannot be determined.
pub fn start_dir(config: &CliConfig) -> Result<PathBuf> {
    match &config.project_dir {
        Some(dir) => Ok(dir.clone()),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

/// Load the global configuration honoring `--config`.
///
/// # Errors
///
/// Fails if the configuration file exists but is malformed.
pub async fn load_global_config(config: &CliConfig) -> Result<GlobalConfig> {
    GlobalConfig::load_with_optional(config.config_path.clone()).await
}

/// Print planned actions, one per line.
pub fn print_actions(actions: &[ReconciliationAction]) {
    for action in actions {
        let label = match action.kind {
            ActionKind::Add => "add".green(),
            ActionKind::Update => "update".yellow(),
            ActionKind::Remove => "remove".red(),
        };

        let versions = match (&action.current_version, &action.new_version) {
            (Some(current), Some(new)) => format!("{current} -> {new}"),
            (None, Some(new)) => new.clone(),
            (Some(current), None) => current.clone(),
            (None, None) => String::new(),
        };

        println!(
            "  {:<8} {:<20} {:<16} {}",
            label,
            action.framework,
            versions,
            action.reason.bright_black()
        );
    }
}
