use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_config_set_and_show_masks_api_key() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["config", "set", "api_key", "ctx7sk-very-secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctx7sk-very-secret").not());
    project.cmd().args(["config", "set", "max_concurrency", "2"]).assert().success();

    let saved = project.read("global.toml");
    assert!(saved.contains("api_key = \"ctx7sk-very-secret\""));
    assert!(saved.contains("max_concurrency = 2"));

    project
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("ctx7sk-very-secret").not());
}

#[test]
fn test_config_set_unknown_key() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["config", "set", "proxy", "http://localhost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
    assert!(!project.exists("global.toml"));
}

#[test]
fn test_config_flag_overrides_env() {
    let project = TestProject::new();
    let custom = project.join("custom.toml");

    project
        .cmd()
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}
