use super::TestContext;
use predicates::prelude::*;

#[test]
fn link_records_declared_and_unpublished_dependencies() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "name": "host", "dependencies": { "dep-a": "1.2.0" } }"#);
    ctx.create_dep("dep-a", "dep-a", "1.2.5");
    ctx.create_dep("dep-b", "dep-b", "0.3.0");

    ctx.tether()
        .args(["link", "../dep-a", "../dep-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Linked dep-a"))
        .stdout(predicate::str::contains("✓ Linked dep-b"));

    let registry = ctx.registry_json();
    assert_eq!(registry.as_object().unwrap().len(), 2);
    assert_eq!(registry["dep-a"]["snapshot"]["kind"], "normal");
    assert_eq!(registry["dep-a"]["snapshot"]["version"]["pinned"], "1.2.0");
    assert_eq!(registry["dep-b"]["snapshot"]["version"], "unpublished");
    assert_eq!(registry["dep-b"]["watch_pattern"], "**/*");
}

#[test]
fn link_dev_dependency_kind() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "devDependencies": { "dep-d": "^4.0.0" } }"#);
    ctx.create_dep("dep-d", "dep-d", "4.1.0");

    ctx.tether().args(["link", "../dep-d"]).assert().success();

    let registry = ctx.registry_json();
    assert_eq!(registry["dep-d"]["snapshot"]["kind"], "dev");
}

#[test]
fn link_missing_path_reports_but_continues() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "dependencies": { "dep-a": "1.0.0" } }"#);
    ctx.create_dep("dep-a", "dep-a", "1.0.0");

    ctx.tether()
        .args(["link", "../missing", "../dep-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("✓ Linked dep-a"));

    let registry = ctx.registry_json();
    assert_eq!(registry.as_object().unwrap().len(), 1);
}

#[test]
fn link_creates_pack_cache_dir() {
    let ctx = TestContext::new();
    ctx.create_host_manifest("{}");
    ctx.create_dep("dep-a", "dep-a", "1.0.0");

    ctx.tether().args(["link", "../dep-a"]).assert().success();

    assert!(ctx.host_dir().join(".tether-cache").is_dir());
}

#[test]
fn link_outside_a_project_fails() {
    let ctx = TestContext::new();
    // No package.json in the host directory.

    ctx.tether()
        .args(["link", "../dep-a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));
}

#[test]
fn status_lists_linked_dependencies() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "dependencies": { "dep-a": "1.2.0" } }"#);
    ctx.create_dep("dep-a", "dep-a", "1.2.5");
    ctx.tether().args(["link", "../dep-a"]).assert().success();

    ctx.tether()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("dep-a"))
        .stdout(predicate::str::contains("was 1.2.0"));
}
