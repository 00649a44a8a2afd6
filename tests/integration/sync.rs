use predicates::prelude::*;

use crate::common::{StubServer, TestProject, unreachable_url};

const DOC_BODY: &str = "# Overview\n\nStub documentation.\n\n## Usage\n\nCall it.\n";

fn initialized(package_json: &str, docs: &StubServer) -> TestProject {
    let project = TestProject::with_package_json(package_json);
    project.write_global_config(&docs.url, &unreachable_url());
    project.cmd().args(["init", "--no-sync"]).assert().success();
    project
}

#[test]
fn test_sync_generates_docs_and_index() {
    let docs = StubServer::start(200, DOC_BODY);
    let project = initialized(
        r#"{"dependencies": {"hono": "^4.3.0", "left-pad": "^1.3.0"}, "devDependencies": {"zod": "^3.23.0"}}"#,
        &docs,
    );

    project
        .cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied actions"))
        .stdout(predicate::str::contains("hono"))
        .stdout(predicate::str::contains("zod"));

    assert_eq!(project.read(".ctxdocs/docs/hono/core/routing.md"), DOC_BODY);
    assert!(project.exists(".ctxdocs/docs/hono/middleware/custom-middleware.md"));
    assert!(project.exists(".ctxdocs/docs/zod"));
    assert!(!project.exists(".ctxdocs/docs/left-pad"));
    assert!(docs.hits() > 0);

    let host = project.read("CLAUDE.md");
    assert!(host.contains("### Hono 4.x"));
    assert!(host.contains("Root: `.ctxdocs/docs/hono/`"));
    assert!(host.contains("routing.md"));
    assert!(host.find("### Hono").unwrap() < host.find("### Zod").unwrap());

    let config = project.read("ctxdocs.toml");
    assert!(config.contains("last_sync"));
    assert!(config.contains("library_id = \"/honojs/website\""));
}

#[test]
fn test_second_sync_is_a_no_op() {
    let docs = StubServer::start(200, DOC_BODY);
    let project = initialized(r#"{"dependencies": {"hono": "^4.3.0"}}"#, &docs);

    project.cmd().arg("sync").assert().success();
    let host = project.read("CLAUDE.md");
    let hits = docs.hits();

    project
        .cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Documentation is up to date"));

    assert_eq!(project.read("CLAUDE.md"), host);
    assert_eq!(docs.hits(), hits);
}

#[test]
fn test_version_bump_and_removal() {
    let docs = StubServer::start(200, DOC_BODY);
    let project =
        initialized(r#"{"dependencies": {"hono": "^4.3.0", "zod": "^3.23.0"}}"#, &docs);
    project.cmd().arg("sync").assert().success();

    project.write("package.json", r#"{"dependencies": {"hono": "^5.0.0"}}"#);
    project
        .cmd()
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4.x -> 5.x"))
        .stdout(predicate::str::contains("not declared"));
    assert!(project.exists(".ctxdocs/docs/zod"));

    project.cmd().arg("sync").assert().success();
    assert!(!project.exists(".ctxdocs/docs/zod"));

    let host = project.read("CLAUDE.md");
    assert!(host.contains("### Hono 5.x"));
    assert!(!host.contains("### Zod"));
    assert!(!project.read("ctxdocs.toml").contains("name = \"zod\""));
}

#[test]
fn test_unavailable_docs_become_placeholders() {
    let docs = StubServer::start(404, "no such library");
    let project = initialized(r#"{"dependencies": {"zod": "^3.23.0"}}"#, &docs);

    project
        .cmd()
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("placeholders"));

    let listed = std::fs::read_dir(project.join(".ctxdocs/docs/zod"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let file = std::fs::read_dir(listed).unwrap().next().unwrap().unwrap().path();
    let content = std::fs::read_to_string(file).unwrap();
    assert!(content.contains("could not be fetched"));
    assert!(content.contains("ctxdocs sync --force"));
}

#[test]
fn test_force_refetches_tracked_frameworks() {
    let docs = StubServer::start(200, DOC_BODY);
    let project = initialized(r#"{"dependencies": {"hono": "^4.3.0"}}"#, &docs);
    project.cmd().arg("sync").assert().success();
    let hits = docs.hits();

    project
        .cmd()
        .args(["sync", "--force", "--max-parallel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("forced refresh"));
    assert!(docs.hits() > hits);
}

#[test]
fn test_sync_preserves_host_document_outside_block() {
    let docs = StubServer::start(200, DOC_BODY);
    let project = initialized(r#"{"dependencies": {"hono": "^4.3.0"}}"#, &docs);

    let original = project.read("CLAUDE.md");
    let edited = format!("{original}\n## Team notes\n\nDeploy on Fridays? Never.\n");
    project.write("CLAUDE.md", &edited);

    project.cmd().arg("sync").assert().success();

    let host = project.read("CLAUDE.md");
    assert!(host.ends_with("\n## Team notes\n\nDeploy on Fridays? Never.\n"));
    assert!(host.starts_with("# Project guide\n"));
    assert!(host.contains("### Hono 4.x"));
}
