use predicates::prelude::*;

use crate::common::{StubServer, TestProject, unreachable_url};

/// A project whose hono documentation is recorded at 4.x.
fn synced_project(registry_url: &str) -> TestProject {
    let docs = StubServer::start(200, "# Overview\n\nStub.\n");
    let project = TestProject::with_package_json(r#"{"dependencies": {"hono": "^4.3.0"}}"#);
    project.write_global_config(&docs.url, registry_url);
    project.cmd().arg("init").assert().success();
    project
}

#[test]
fn test_outdated_reports_newer_major() {
    let registry = StubServer::start(200, r#"{"name":"hono","version":"5.0.2"}"#);
    let project = synced_project(&registry.url);

    project
        .cmd()
        .arg("outdated")
        .assert()
        .success()
        .stdout(predicate::str::contains("5.0.2"))
        .stdout(predicate::str::contains("older major version"));
}

#[test]
fn test_outdated_check_exits_nonzero_when_stale() {
    let registry = StubServer::start(200, r#"{"version":"5.0.2"}"#);
    let project = synced_project(&registry.url);

    project.cmd().args(["outdated", "--check"]).assert().failure().code(1);
}

#[test]
fn test_outdated_check_passes_when_current() {
    let registry = StubServer::start(200, r#"{"version":"4.9.1"}"#);
    let project = synced_project(&registry.url);

    project.cmd().args(["outdated", "--check"]).assert().success();
}

#[test]
fn test_outdated_json() {
    let registry = StubServer::start(200, r#"{"version":"5.0.2"}"#);
    let project = synced_project(&registry.url);

    let output = project.cmd().args(["outdated", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["stale"], 1);
    assert_eq!(value["frameworks"][0]["framework"], "hono");
    assert_eq!(value["frameworks"][0]["recorded"], "4.x");
    assert_eq!(value["frameworks"][0]["latest"], "5.0.2");
}

#[test]
fn test_outdated_registry_failure_is_unknown() {
    let project = synced_project(&unreachable_url());

    project
        .cmd()
        .arg("outdated")
        .assert()
        .success()
        .stdout(predicate::str::contains("?"))
        .stdout(predicate::str::contains("lookup(s) failed"));
}
