use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_init_no_sync_creates_layout() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["init", "--no-sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(project.exists("ctxdocs.toml"));
    assert!(project.join(".ctxdocs/docs").is_dir());
    assert!(project.join(".ctxdocs/internal").is_dir());
    assert!(project.join(".ctxdocs/templates").is_dir());

    let host = project.read("CLAUDE.md");
    assert!(host.starts_with("# Project guide\n"));
    assert!(host.contains("<!-- ctxdocs:begin -->\n"));
    assert!(host.ends_with("<!-- ctxdocs:end -->\n"));
}

#[test]
fn test_init_twice_requires_force() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();

    project
        .cmd()
        .args(["init", "--no-sync"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("init --force"));

    project.cmd().args(["init", "--no-sync", "--force"]).assert().success();
}

#[test]
fn test_init_without_package_json_skips_sync() {
    let project = TestProject::new();

    project
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("No package.json found"));

    assert!(project.exists("CLAUDE.md"));
}

#[test]
fn test_init_syncs_static_templates_offline() {
    let project = TestProject::with_package_json(
        r#"{"devDependencies": {"typescript": "~5.6.2", "left-pad": "1.3.0"}}"#,
    );

    project.cmd().arg("init").assert().success();

    assert!(project.exists(".ctxdocs/docs/typescript/conventions/strictness.md"));
    let config = project.read("ctxdocs.toml");
    assert!(config.contains("name = \"typescript\""));
    assert!(config.contains("version = \"5.x\""));
    assert!(config.contains("source = \"static\""));
    assert!(project.read("CLAUDE.md").contains("### TypeScript 5.x"));
}
