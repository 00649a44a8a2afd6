//! Initialize ctxdocs in a project.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::{CommandContext, start_dir};
use super::sync::sync_project;
use crate::config::{Project, ProjectConfig};
use crate::constants::{CONFIG_FILE_NAME, PACKAGE_MANIFEST_NAME};
use crate::core::CtxdocsError;
use crate::index::refresh_host_document;
use crate::sync::SyncOptions;
use crate::templates::TemplateRegistry;
use crate::utils::fs::ensure_dir;

#[derive(Debug, Args, Default)]
pub struct InitCommand {
    /// Overwrite an existing ctxdocs.toml
    #[arg(long)]
    force: bool,

    /// Only write the configuration; do not fetch documentation
    #[arg(long)]
    no_sync: bool,
}

impl InitCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let root = start_dir(config)?;
        let config_path = root.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(CtxdocsError::ConfigAlreadyExists {
                path: config_path.display().to_string(),
            }
            .into());
        }

        let project = Project {
            root: root.clone(),
            config: ProjectConfig::default(),
        };
        ensure_dir(&root)?;
        project.save()?;
        ensure_dir(&project.docs_dir())?;
        ensure_dir(&project.internal_dir())?;
        ensure_dir(&project.templates_dir())?;

        println!("{} Initialized {}", "✓".green(), config_path.display());

        let has_manifest = root.join(PACKAGE_MANIFEST_NAME).exists();
        if self.no_sync || !has_manifest {
            if !has_manifest {
                println!(
                    "{} No {} found; documentation will be fetched on the next {}",
                    "!".yellow(),
                    PACKAGE_MANIFEST_NAME,
                    "ctxdocs sync".bright_white()
                );
            }
            let templates = TemplateRegistry::load(&project.templates_dir())?;
            let outcome = refresh_host_document(&project, &templates, false)?;
            if outcome.changed {
                println!("{} Wrote index block to {}", "✓".green(), outcome.path.display());
            }
            return Ok(());
        }

        let mut ctx = CommandContext::load(&CliConfig {
            project_dir: Some(root),
            ..config.clone()
        })?;
        let options = SyncOptions {
            show_progress: config.show_progress(),
            ..Default::default()
        };
        sync_project(&mut ctx, config, options, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(dir: &std::path::Path) -> CliConfig {
        CliConfig {
            project_dir: Some(dir.to_path_buf()),
            no_progress: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_init_without_sync() {
        let temp = TempDir::new().unwrap();
        let cmd = InitCommand {
            force: false,
            no_sync: true,
        };
        cmd.execute(&config_for(temp.path())).await.unwrap();

        assert!(temp.path().join("ctxdocs.toml").exists());
        assert!(temp.path().join(".ctxdocs/docs").is_dir());
        assert!(temp.path().join(".ctxdocs/internal").is_dir());
        assert!(temp.path().join(".ctxdocs/templates").is_dir());

        let host = std::fs::read_to_string(temp.path().join("CLAUDE.md")).unwrap();
        assert!(host.contains("<!-- ctxdocs:begin -->"));
    }

    #[tokio::test]
    async fn test_init_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ctxdocs.toml"), "version = 1\n").unwrap();

        let err = InitCommand {
            force: false,
            no_sync: true,
        }
        .execute(&config_for(temp.path()))
        .await
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));

        InitCommand {
            force: true,
            no_sync: true,
        }
        .execute(&config_for(temp.path()))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_init_keeps_existing_host_document() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("CLAUDE.md"), "# Mine\n\nKeep this.\n").unwrap();

        InitCommand {
            force: false,
            no_sync: true,
        }
        .execute(&config_for(temp.path()))
        .await
        .unwrap();

        let host = std::fs::read_to_string(temp.path().join("CLAUDE.md")).unwrap();
        assert!(host.starts_with("# Mine\n\nKeep this.\n\n<!-- ctxdocs:begin -->\n"));
    }
}
