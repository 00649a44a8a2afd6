//! Reconciliation planning.
//!
//! The planner compares the dependencies a project declares against the
//! documentation state recorded in `ctxdocs.toml` and produces the minimal
//! set of actions that brings the cache back in line:
//!
//! | Situation | Action |
//! |-----------|--------|
//! | recorded framework, declared with a different major token | `Update` |
//! | recorded framework, no longer declared | `Remove` |
//! | declared dependency with a template, nothing recorded | `Add` |
//! | declared dependency without a template | none |
//!
//! A recorded framework matches a dependency when the dependency's template
//! reference or its package name equals the framework name. When several
//! declared packages share one template, the package named like the
//! framework decides its version; other aliases count only when it is not
//! declared. Aliases report the status of the framework they document. Update and
//! removal are mutually exclusive for a framework, and additions are only
//! emitted for frameworks with no recorded state, so each framework gets at
//! most one action per run.
//!
//! Output order: recorded frameworks in recorded order (updates and
//! removals), then declared dependencies in declared order (additions).
//!
//! A declared version that normalizes to `unknown` never triggers an update;
//! there is nothing meaningful to compare.
//!
//! Planning is pure: no I/O, no clock, no logging.

use serde::Serialize;
use std::collections::HashSet;

use crate::config::FrameworkState;
use crate::manifest::DependencyRecord;
use crate::version::{is_unknown, normalize_major};

/// What to do with one framework's documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Add,
    Update,
    Remove,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Update => write!(f, "update"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

/// One planned change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationAction {
    pub kind: ActionKind,
    /// Framework (template) name
    pub framework: String,
    /// Recorded major token, absent for additions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_version: Option<String>,
    /// Declared major token, absent for removals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_version: Option<String>,
    /// Human-readable cause
    pub reason: String,
}

/// Documentation status of one declared dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    /// Recorded documentation matches the declared major version
    UpToDate,
    /// Declared major version differs from the recorded one
    UpdateAvailable,
    /// A template exists but nothing has been generated yet
    New,
    /// No template documents this dependency
    NotDocumented,
    /// Recorded, but the declared version has no comparable major token
    VersionUnknown,
}

impl std::fmt::Display for DependencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::UpToDate => "up to date",
            Self::UpdateAvailable => "update available",
            Self::New => "new",
            Self::NotDocumented => "not documented",
            Self::VersionUnknown => "version unknown",
        };
        f.write_str(label)
    }
}

/// Status line for one declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub name: String,
    pub version_spec: String,
    /// Normalized declared major token
    pub declared: String,
    /// Framework the dependency is documented under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    /// Recorded major token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded: Option<String>,
    pub status: DependencyStatus,
}

/// Planner switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Re-generate every recorded framework that is still declared
    pub force: bool,
}

/// Result of planning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub actions: Vec<ReconciliationAction>,
    pub statuses: Vec<DependencyReport>,
}

impl Plan {
    /// Whether there is nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Number of actions of `kind`.
    #[must_use]
    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }
}

fn matches(dependency: &DependencyRecord, framework: &str) -> bool {
    dependency.template.as_deref() == Some(framework) || dependency.name == framework
}

/// The declared dependency whose version governs `framework`.
///
/// A package named like the framework wins over aliases that share its
/// template; otherwise the first matching alias in declared order.
#[must_use]
pub fn primary_dependency<'a>(
    dependencies: &'a [DependencyRecord],
    framework: &str,
) -> Option<&'a DependencyRecord> {
    dependencies
        .iter()
        .find(|d| d.name == framework)
        .or_else(|| dependencies.iter().find(|d| matches(d, framework)))
}

/// Plan the actions reconciling `dependencies` with `recorded`.
///
/// `has_template` reports whether a documentation template exists for a
/// framework name; dependencies whose template is unknown are never added.
///
/// # Examples
///
/// ```rust
/// use ctxdocs_cli::manifest::DependencyRecord;
/// use ctxdocs_cli::planner::{ActionKind, PlanOptions, plan_actions};
///
/// let deps = vec![DependencyRecord::new("hono", "^4.3.0").with_template("hono")];
/// let plan = plan_actions(&deps, &[], |name| name == "hono", PlanOptions::default());
///
/// assert_eq!(plan.actions.len(), 1);
/// assert_eq!(plan.actions[0].kind, ActionKind::Add);
/// assert_eq!(plan.actions[0].new_version.as_deref(), Some("4.x"));
/// ```
pub fn plan_actions(
    dependencies: &[DependencyRecord],
    recorded: &[FrameworkState],
    has_template: impl Fn(&str) -> bool,
    options: PlanOptions,
) -> Plan {
    let mut actions = Vec::new();

    for framework in recorded {
        match primary_dependency(dependencies, &framework.name) {
            Some(dependency) => {
                let declared = normalize_major(&dependency.version_spec);
                if is_unknown(&declared) {
                    continue;
                }
                let reason = if declared != framework.version {
                    "version changed"
                } else if options.force {
                    "forced refresh"
                } else {
                    continue;
                };
                actions.push(ReconciliationAction {
                    kind: ActionKind::Update,
                    framework: framework.name.clone(),
                    current_version: Some(framework.version.clone()),
                    new_version: Some(declared),
                    reason: reason.to_string(),
                });
            }
            None => actions.push(ReconciliationAction {
                kind: ActionKind::Remove,
                framework: framework.name.clone(),
                current_version: Some(framework.version.clone()),
                new_version: None,
                reason: "not declared".to_string(),
            }),
        }
    }

    let mut added = HashSet::new();
    for dependency in dependencies {
        let Some(template) = dependency.template.as_deref() else {
            continue;
        };
        if !has_template(template)
            || recorded.iter().any(|f| f.name == template)
            || !added.insert(template)
        {
            continue;
        }
        let governing = primary_dependency(dependencies, template).unwrap_or(dependency);
        actions.push(ReconciliationAction {
            kind: ActionKind::Add,
            framework: template.to_string(),
            current_version: None,
            new_version: Some(normalize_major(&governing.version_spec)),
            reason: "new dependency detected".to_string(),
        });
    }

    let statuses =
        dependencies.iter().map(|d| report(d, dependencies, recorded, &has_template)).collect();

    Plan {
        actions,
        statuses,
    }
}

fn report(
    dependency: &DependencyRecord,
    dependencies: &[DependencyRecord],
    recorded: &[FrameworkState],
    has_template: &impl Fn(&str) -> bool,
) -> DependencyReport {
    let declared = normalize_major(&dependency.version_spec);
    let state = recorded.iter().find(|f| matches(dependency, &f.name));
    let template = dependency.template.as_deref().filter(|t| has_template(t));

    let governing = match state {
        Some(state) => primary_dependency(dependencies, &state.name)
            .map_or_else(|| declared.clone(), |d| normalize_major(&d.version_spec)),
        None => declared.clone(),
    };

    let status = match state {
        Some(_) if is_unknown(&governing) => DependencyStatus::VersionUnknown,
        Some(state) if state.version != governing => DependencyStatus::UpdateAvailable,
        Some(_) => DependencyStatus::UpToDate,
        None if template.is_some() => DependencyStatus::New,
        None => DependencyStatus::NotDocumented,
    };

    DependencyReport {
        name: dependency.name.clone(),
        version_spec: dependency.version_spec.clone(),
        declared,
        framework: state.map(|s| s.name.clone()).or_else(|| template.map(str::to_string)),
        recorded: state.map(|s| s.version.clone()),
        status,
    }
}
