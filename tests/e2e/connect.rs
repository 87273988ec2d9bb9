use super::TestContext;
use predicates::prelude::*;

fn linked_context() -> TestContext {
    let ctx = TestContext::new();
    ctx.create_host_manifest(
        r#"{
            "name": "host",
            "dependencies": { "dep-a": "1.2.0" },
            "devDependencies": { "dep-c": "^3.0.0" }
        }"#,
    );
    ctx.create_dep("dep-a", "dep-a", "1.2.5");
    ctx.create_dep("dep-b", "dep-b", "0.3.0");
    ctx.create_dep("dep-c", "dep-c", "3.1.0");
    ctx.tether()
        .args(["link", "../dep-a", "../dep-b", "../dep-c"])
        .assert()
        .success();
    ctx
}

#[test]
fn connect_packs_all_and_batches_installs_by_kind() {
    let ctx = linked_context();

    ctx.tether()
        .arg("connect")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Connected dep-a"))
        .stdout(predicate::str::contains("✓ Connected dep-c"));

    let log = ctx.npm_log();
    let packs = log.lines().filter(|l| l.starts_with("npm pack")).count();
    assert_eq!(packs, 3);

    // One install per kind, both normal archives in one call.
    let installs: Vec<&str> = log.lines().filter(|l| l.starts_with("npm install")).collect();
    assert_eq!(installs.len(), 2);
    let normal = installs
        .iter()
        .find(|l| !l.contains("--save-dev"))
        .unwrap();
    assert_eq!(normal.matches("file:").count(), 2);
    let dev = installs.iter().find(|l| l.contains("--save-dev")).unwrap();
    assert_eq!(dev.matches("file:").count(), 1);
}

#[test]
fn connect_stages_uniquely_named_archives() {
    let ctx = linked_context();

    ctx.tether().arg("connect").assert().success();
    ctx.tether().arg("connect").assert().success();

    let cache = ctx.host_dir().join(".tether-cache");
    let archives: Vec<String> = std::fs::read_dir(&cache)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("dep-a-1.2.5-"))
        .collect();

    // Two connects, two distinct archives for the same record.
    assert_eq!(archives.len(), 2);
    assert_ne!(archives[0], archives[1]);
}

#[test]
fn connect_without_links_is_a_noop() {
    let ctx = TestContext::new();
    ctx.create_host_manifest("{}");

    ctx.tether()
        .arg("connect")
        .assert()
        .success()
        .stdout(predicate::str::contains("No linked dependencies"));

    assert!(ctx.npm_log().is_empty());
}
