use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_missing_config_suggests_init() {
    let project = TestProject::with_package_json(r#"{"dependencies": {}}"#);

    project
        .cmd()
        .arg("status")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No ctxdocs configuration found"))
        .stderr(predicate::str::contains("ctxdocs init"));
}

#[test]
fn test_missing_package_json_is_reported_once() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();

    project
        .cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No manifest found"))
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn test_malformed_package_json() {
    let project = TestProject::with_package_json("{ not json");
    project.cmd().args(["init", "--no-sync"]).assert().success();

    project
        .cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid package manifest"));
}

#[test]
fn test_duplicate_framework_in_config() {
    let project = TestProject::with_package_json(r#"{"dependencies": {}}"#);
    let state = r#"
[[frameworks]]
name = "hono"
version = "4.x"
source = "generated"
updated_at = "2026-01-01T00:00:00Z"
file_count = 1
categories = ["core"]
"#;
    project.write("ctxdocs.toml", &format!("version = 1\n{state}{state}"));

    project
        .cmd()
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("recorded more than once"));
}

#[test]
fn test_recorded_name_outside_docs_dir_is_rejected() {
    let project = TestProject::with_package_json(r#"{"dependencies": {}}"#);
    project.write("src/main.rs", "fn main() {}\n");
    project.write(".ctxdocs/docs/.keep", "");
    project.write(
        "ctxdocs.toml",
        r#"version = 1

[[frameworks]]
name = "../../src"
version = "1.x"
source = "static"
updated_at = "2026-01-01T00:00:00Z"
"#,
    );

    project
        .cmd()
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a plain directory name"));
    assert!(project.exists("src/main.rs"));
}

#[test]
fn test_project_dir_flag() {
    let project = TestProject::with_package_json(r#"{"dependencies": {"zod": "^3.23.0"}}"#);
    project.cmd().args(["init", "--no-sync"]).assert().success();

    let elsewhere = TestProject::new();
    elsewhere
        .cmd()
        .args(["status", "--project-dir"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("zod"));
}
