//! One full reconciliation pass.
//!
//! [`run_sync`] reads the declared dependencies, plans, applies the plan,
//! rebuilds the host document index, and records the sync time. The project
//! configuration is mutated in memory throughout and saved once at the end.

pub mod executor;

pub use executor::{AppliedAction, SyncExecutor};

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::config::Project;
use crate::constants::PACKAGE_MANIFEST_NAME;
use crate::fetch::{DocSource, FetchCoordinator};
use crate::index::{IndexOutcome, refresh_host_document};
use crate::manifest::PackageManifest;
use crate::planner::{Plan, PlanOptions, plan_actions};
use crate::templates::TemplateRegistry;

/// Switches for a sync pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Plan and report without writing anything
    pub dry_run: bool,
    /// Regenerate every declared framework
    pub force: bool,
    /// Draw progress bars
    pub show_progress: bool,
}

/// Everything a sync pass did.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub plan: Plan,
    /// Empty for dry runs
    pub applied: Vec<AppliedAction>,
    pub index: IndexOutcome,
}

impl SyncReport {
    /// Actions that could not be applied.
    pub fn failures(&self) -> impl Iterator<Item = &AppliedAction> {
        self.applied.iter().filter(|a| !a.succeeded())
    }

    /// Total placeholder files written.
    #[must_use]
    pub fn placeholders(&self) -> usize {
        self.applied.iter().map(|a| a.placeholders).sum()
    }
}

/// Plan the pass for `project` without touching anything.
///
/// # Errors
///
/// Fails if `package.json` is missing or malformed.
pub fn plan_project(
    project: &Project,
    templates: &TemplateRegistry,
    options: PlanOptions,
) -> Result<Plan> {
    let manifest = PackageManifest::load(&project.root.join(PACKAGE_MANIFEST_NAME))?;
    let dependencies = manifest.dependency_records(templates);
    debug!("{} declared dependencies", dependencies.len());

    Ok(plan_actions(
        &dependencies,
        &project.config.frameworks,
        |name| templates.contains(name),
        options,
    ))
}

/// Run a full sync pass.
///
/// # Errors
///
/// Structural problems (missing or malformed `package.json`, unreadable
/// docs directory, failure to write the host document or configuration)
/// abort the pass. Per-framework failures do not; they are in
/// [`SyncReport::applied`].
pub async fn run_sync<D: DocSource>(
    project: &mut Project,
    templates: &TemplateRegistry,
    docs: &D,
    coordinator: FetchCoordinator,
    options: SyncOptions,
) -> Result<SyncReport> {
    let plan = plan_project(
        project,
        templates,
        PlanOptions {
            force: options.force,
        },
    )?;

    if options.dry_run {
        let index = refresh_host_document(project, templates, true)?;
        return Ok(SyncReport {
            plan,
            applied: Vec::new(),
            index,
        });
    }

    let applied = SyncExecutor::new(templates, docs, coordinator)
        .with_progress(options.show_progress)
        .apply(project, &plan.actions)
        .await;

    let index = refresh_host_document(project, templates, false)?;

    project.config.last_sync = Some(Utc::now());
    project.save()?;
    info!("Sync complete: {} actions applied", applied.iter().filter(|a| a.succeeded()).count());

    Ok(SyncReport {
        plan,
        applied,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;
    use crate::constants::CONFIG_FILE_NAME;
    use crate::fetch::FetchOutcome;
    use crate::planner::ActionKind;
    use crate::test_utils::write_project;
    use std::future::Future;
    use std::time::Duration;
    use tempfile::TempDir;

    struct EchoDocs;

    impl DocSource for EchoDocs {
        fn fetch(
            &self,
            _library_id: &str,
            topic: &str,
            _tokens: u32,
        ) -> impl Future<Output = FetchOutcome> + Send {
            let text = format!("# Usage\n{topic}\n");
            async move { FetchOutcome::Fetched(text) }
        }
    }

    fn setup(package_json: &str) -> (TempDir, Project) {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), package_json).unwrap();
        let project = Project::load(temp.path()).unwrap();
        (temp, project)
    }

    fn coordinator() -> FetchCoordinator {
        FetchCoordinator::new(5, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_full_pass_then_noop() {
        let (temp, mut project) =
            setup(r#"{"dependencies": {"hono": "^4.3.0", "left-pad": "^1.0.0"}}"#);
        let templates = TemplateRegistry::builtin().unwrap();

        let report =
            run_sync(&mut project, &templates, &EchoDocs, coordinator(), SyncOptions::default())
                .await
                .unwrap();
        assert_eq!(report.plan.count(ActionKind::Add), 1);
        assert!(report.index.created);
        assert_eq!(report.failures().count(), 0);

        let saved = ProjectConfig::load(&temp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(saved.framework("hono").unwrap().version, "4.x");
        assert!(saved.last_sync.is_some());

        let host = std::fs::read_to_string(temp.path().join("CLAUDE.md")).unwrap();
        assert!(host.contains("### Hono 4.x"));

        let again =
            run_sync(&mut project, &templates, &EchoDocs, coordinator(), SyncOptions::default())
                .await
                .unwrap();
        assert!(again.plan.is_empty());
        assert!(!again.index.changed);
        assert_eq!(std::fs::read_to_string(temp.path().join("CLAUDE.md")).unwrap(), host);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let (temp, mut project) = setup(r#"{"dependencies": {"zod": "^3.23.0"}}"#);
        let templates = TemplateRegistry::builtin().unwrap();

        let report = run_sync(
            &mut project,
            &templates,
            &EchoDocs,
            coordinator(),
            SyncOptions {
                dry_run: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(report.plan.count(ActionKind::Add), 1);
        assert!(report.applied.is_empty());
        assert!(!temp.path().join("CLAUDE.md").exists());
        assert!(!temp.path().join(".ctxdocs/docs/zod").exists());
    }

    #[tokio::test]
    async fn test_missing_manifest_aborts() {
        let temp = TempDir::new().unwrap();
        let mut project = Project {
            root: temp.path().to_path_buf(),
            config: ProjectConfig::default(),
        };

        let err = run_sync(
            &mut project,
            &TemplateRegistry::builtin().unwrap(),
            &EchoDocs,
            coordinator(),
            SyncOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("No manifest found"));
    }
}
