use super::TestContext;
use predicates::prelude::*;

#[test]
fn reset_restores_snapshot_and_removes_unpublished() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "dependencies": { "dep-a": "1.2.0" } }"#);
    ctx.create_dep("dep-a", "dep-a", "1.2.5");
    ctx.create_dep("dep-b", "dep-b", "0.3.0");
    ctx.tether()
        .args(["link", "../dep-a", "../dep-b"])
        .assert()
        .success();

    // Reconcile a few times; the snapshot must not drift.
    ctx.tether().arg("connect").assert().success();
    ctx.tether().arg("connect").assert().success();

    ctx.tether()
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Reset done"));

    let log = ctx.npm_log();
    assert!(log.contains("npm install dep-a@1.2.0"));
    assert!(log.contains("npm uninstall dep-b"));
    // The unpublished dependency is never pin-installed.
    assert!(!log.contains("dep-b@"));

    // All engine-owned state is gone.
    assert!(!ctx.host_dir().join(".tether.json").exists());
    assert!(!ctx.host_dir().join(".tether-cache").exists());
}

#[test]
fn connect_after_reset_is_a_noop() {
    let ctx = TestContext::new();
    ctx.create_host_manifest(r#"{ "dependencies": { "dep-a": "1.2.0" } }"#);
    ctx.create_dep("dep-a", "dep-a", "1.2.5");
    ctx.tether().args(["link", "../dep-a"]).assert().success();
    ctx.tether().arg("reset").assert().success();

    ctx.tether()
        .arg("connect")
        .assert()
        .success()
        .stdout(predicate::str::contains("No linked dependencies"));
}

#[test]
fn reset_without_links_is_a_noop() {
    let ctx = TestContext::new();
    ctx.create_host_manifest("{}");

    ctx.tether()
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to reset"));

    assert!(ctx.npm_log().is_empty());
}
