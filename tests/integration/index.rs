use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_index_lists_internal_docs() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();
    project.write(".ctxdocs/internal/architecture.md", "# Architecture\n");
    project.write(".ctxdocs/internal/runbooks/deploy.md", "# Deploy\n");

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));

    let host = project.read("CLAUDE.md");
    assert!(host.contains("### Internal documentation"));
    assert!(host.contains("architecture.md"));
    assert!(host.contains("deploy.md"));
}

#[test]
fn test_index_is_idempotent() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();
    let first = project.read("CLAUDE.md");

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));
    assert_eq!(project.read("CLAUDE.md"), first);
}

#[test]
fn test_index_repairs_malformed_block_by_appending() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();
    project.write("CLAUDE.md", "# Guide\n<!-- ctxdocs:end -->\nstray\n<!-- ctxdocs:begin -->\n");

    project.cmd().arg("index").assert().success();
    let repaired = project.read("CLAUDE.md");
    assert!(repaired.starts_with("# Guide\n<!-- ctxdocs:end -->\nstray\n<!-- ctxdocs:begin -->\n\n"));
    assert!(repaired.ends_with("<!-- ctxdocs:end -->\n"));

    project
        .cmd()
        .arg("index")
        .assert()
        .success()
        .stdout(predicate::str::contains("is up to date"));
    assert_eq!(project.read("CLAUDE.md"), repaired);
}

#[test]
fn test_index_dry_run_writes_nothing() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();
    std::fs::remove_file(project.join("CLAUDE.md")).unwrap();

    project
        .cmd()
        .args(["index", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would be updated"));
    assert!(!project.exists("CLAUDE.md"));
}
