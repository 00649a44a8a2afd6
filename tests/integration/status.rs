use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_status_lists_every_dependency() {
    let project = TestProject::with_package_json(
        r#"{"dependencies": {"hono": "^4.3.0", "left-pad": "^1.3.0"}, "devDependencies": {"vitest": "latest"}}"#,
    );
    project.cmd().args(["init", "--no-sync"]).assert().success();

    project
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("hono"))
        .stdout(predicate::str::contains("4.x"))
        .stdout(predicate::str::contains("not documented"))
        .stdout(predicate::str::contains("new dependency detected"))
        .stdout(predicate::str::contains("No documentation has been generated yet"));
}

#[test]
fn test_status_json_after_offline_sync() {
    let project = TestProject::with_package_json(r#"{"devDependencies": {"typescript": "^5.6.0"}}"#);
    project.cmd().arg("init").assert().success();

    let output = project.cmd().args(["status", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["dependencies"][0]["name"], "typescript");
    assert_eq!(value["dependencies"][0]["status"], "up_to_date");
    assert_eq!(value["frameworks"][0]["version"], "5.x");
    assert_eq!(value["pending"].as_array().unwrap().len(), 0);
}

#[test]
fn test_status_flags_version_change() {
    let project = TestProject::with_package_json(r#"{"devDependencies": {"typescript": "^5.6.0"}}"#);
    project.cmd().arg("init").assert().success();
    project.write("package.json", r#"{"devDependencies": {"typescript": "^6.0.0"}}"#);

    project
        .cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("update available"))
        .stdout(predicate::str::contains("5.x -> 6.x"));
}
