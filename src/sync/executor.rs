//! Applying reconciliation actions to the docs directory.
//!
//! For `Add` and `Update` the executor gathers every file the framework's
//! template declares, fetched files through the [`FetchCoordinator`] and
//! static files from the template itself. Content is budgeted to the
//! configured size, then the framework directory is cleared and rewritten so
//! files a template no longer lists do not linger. A file whose content could
//! not be fetched is written as a placeholder explaining why.
//!
//! For `Remove` the framework directory and its recorded state are deleted.
//!
//! Actions are independent: one failing is reported and the rest still run.

use anyhow::Result;
use chrono::Utc;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::budget::budget_content;
use crate::config::{FrameworkState, Project};
use crate::constants::UNKNOWN_VERSION;
use crate::core::CtxdocsError;
use crate::fetch::{DocSource, FetchCoordinator, FetchOutcome};
use crate::planner::{ActionKind, ReconciliationAction};
use crate::templates::{DocTemplate, TemplateFile, TemplateRegistry};
use crate::utils::fs::{atomic_write, remove_dir_all};
use crate::utils::path_validation::child_dir;
use crate::utils::progress::ProgressBar;

/// What happened when one action was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedAction {
    pub action: ReconciliationAction,
    /// Files written, placeholders included
    pub files_written: usize,
    /// Files written as placeholders
    pub placeholders: usize,
    /// Why the action could not be applied
    pub error: Option<String>,
}

impl AppliedAction {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Writes documentation for planned actions.
pub struct SyncExecutor<'a, D> {
    templates: &'a TemplateRegistry,
    docs: &'a D,
    coordinator: FetchCoordinator,
    show_progress: bool,
}

impl<'a, D: DocSource> SyncExecutor<'a, D> {
    pub fn new(templates: &'a TemplateRegistry, docs: &'a D, coordinator: FetchCoordinator) -> Self {
        Self {
            templates,
            docs,
            coordinator,
            show_progress: false,
        }
    }

    /// Show a progress bar per framework.
    #[must_use]
    pub const fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Apply `actions` in order, updating `project.config` as each succeeds.
    pub async fn apply(
        &self,
        project: &mut Project,
        actions: &[ReconciliationAction],
    ) -> Vec<AppliedAction> {
        let mut applied = Vec::with_capacity(actions.len());

        for action in actions {
            let result = match action.kind {
                ActionKind::Add | ActionKind::Update => self.generate(project, action).await,
                ActionKind::Remove => self.remove(project, action),
            };

            applied.push(match result {
                Ok((files_written, placeholders)) => AppliedAction {
                    action: action.clone(),
                    files_written,
                    placeholders,
                    error: None,
                },
                Err(e) => {
                    warn!("Failed to {} {}: {e:#}", action.kind, action.framework);
                    AppliedAction {
                        action: action.clone(),
                        files_written: 0,
                        placeholders: 0,
                        error: Some(format!("{e:#}")),
                    }
                }
            });
        }

        applied
    }

    fn remove(&self, project: &mut Project, action: &ReconciliationAction) -> Result<(usize, usize)> {
        let dir = child_dir(&project.docs_dir(), &action.framework)?;
        remove_dir_all(&dir)?;
        project.config.remove_framework(&action.framework);
        info!("Removed documentation for {}", action.framework);
        Ok((0, 0))
    }

    async fn generate(
        &self,
        project: &mut Project,
        action: &ReconciliationAction,
    ) -> Result<(usize, usize)> {
        let template = self.templates.get(&action.framework).ok_or_else(|| {
            CtxdocsError::TemplateNotFound {
                name: action.framework.clone(),
            }
        })?;

        let contents = self.collect(project, template).await;
        let max_chars = project.config.limits.max_file_chars;

        let framework_dir = child_dir(&project.docs_dir(), &template.name)?;
        remove_dir_all(&framework_dir)?;

        let mut categories = BTreeSet::new();
        let mut placeholders = 0;
        let mut written = 0;

        for ((category, file), outcome) in template.files().zip(contents) {
            let text = match outcome {
                FetchOutcome::Fetched(text) => budget_content(&text, max_chars).into_owned(),
                FetchOutcome::Failed(reason) => {
                    placeholders += 1;
                    placeholder(template, file, &reason)
                }
            };

            let path = framework_dir.join(&category.name).join(file.file_name());
            atomic_write(&path, text.as_bytes())?;
            categories.insert(category.name.clone());
            written += 1;
        }

        let version = action.new_version.clone().unwrap_or_else(|| UNKNOWN_VERSION.to_string());
        info!(
            "Wrote {written} files for {} {version} ({placeholders} placeholders)",
            template.name
        );

        project.config.upsert_framework(FrameworkState {
            name: template.name.clone(),
            version,
            source: template.source(),
            library_id: template.library_id.clone(),
            updated_at: Utc::now(),
            file_count: written,
            categories,
        });

        Ok((written, placeholders))
    }

    /// Content for every template file, in template order.
    async fn collect(&self, project: &Project, template: &DocTemplate) -> Vec<FetchOutcome> {
        let files: Vec<&TemplateFile> = template.files().map(|(_, file)| file).collect();
        let tokens = project.config.limits.tokens_per_file;

        let fetch_indices: Vec<usize> =
            files.iter().enumerate().filter(|(_, f)| f.content.is_none()).map(|(i, _)| i).collect();

        let mut fetched = match &template.library_id {
            Some(library_id) if !fetch_indices.is_empty() => {
                let progress = ProgressBar::new(fetch_indices.len() as u64, self.show_progress);
                progress.set_message(format!("Fetching {} documentation", template.title()));

                let results = self
                    .coordinator
                    .clone()
                    .with_progress(progress.clone())
                    .run(fetch_indices, |index| {
                        let topic = files[index].topic.clone().unwrap_or_default();
                        async move { Ok::<_, anyhow::Error>(self.docs.fetch(library_id, &topic, tokens).await) }
                    })
                    .await;

                progress.finish_with_message(format!("{} documentation fetched", template.title()));
                results
            }
            _ => Default::default(),
        };

        files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                if let Some(content) = &file.content {
                    return FetchOutcome::Fetched(content.clone());
                }
                match fetched.remove(&index) {
                    Some(Some(outcome)) => outcome,
                    Some(None) => FetchOutcome::Failed("request timed out".to_string()),
                    None => {
                        debug!("No fetch issued for {} in {}", file.name, template.name);
                        FetchOutcome::Failed("no documentation source configured".to_string())
                    }
                }
            })
            .collect()
    }
}

fn placeholder(template: &DocTemplate, file: &TemplateFile, reason: &str) -> String {
    let topic = file.topic.as_deref().unwrap_or(&file.name);
    format!(
        "# {} - {}\n\n\
         Documentation for this topic could not be fetched ({reason}).\n\n\
         Run `ctxdocs sync --force` to try again.\n",
        template.title(),
        topic
    )
}
