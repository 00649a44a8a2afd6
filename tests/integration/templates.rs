use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_templates_lists_builtins() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();

    project
        .cmd()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("hono"))
        .stdout(predicate::str::contains("drizzle-orm"))
        .stdout(predicate::str::contains("builtin"));
}

#[test]
fn test_project_template_overrides_builtin() {
    let project = TestProject::with_package_json(r#"{"dependencies": {"hono": "^4.3.0"}}"#);
    project.cmd().args(["init", "--no-sync"]).assert().success();
    project.write(
        ".ctxdocs/templates/hono.toml",
        r##"
name = "hono"
display_name = "Hono (house style)"
packages = ["hono"]

[[categories]]
name = "rules"

[[categories.files]]
name = "handlers"
content = "# Handlers\n\nKeep handlers thin.\n"
"##,
    );

    let output = project.cmd().args(["templates", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let hono = rows.as_array().unwrap().iter().find(|r| r["name"] == "hono").unwrap();
    assert_eq!(hono["origin"], "project");
    assert_eq!(hono["source"], "static");
    assert_eq!(hono["files"], 1);

    project.cmd().arg("sync").assert().success();
    assert_eq!(
        project.read(".ctxdocs/docs/hono/rules/handlers.md"),
        "# Handlers\n\nKeep handlers thin.\n"
    );
    assert!(project.read("CLAUDE.md").contains("### Hono (house style) 4.x"));
}

#[test]
fn test_invalid_project_template_is_reported() {
    let project = TestProject::new();
    project.cmd().args(["init", "--no-sync"]).assert().success();
    project.write(".ctxdocs/templates/broken.toml", "name = \n");

    project
        .cmd()
        .arg("templates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template"));
}
