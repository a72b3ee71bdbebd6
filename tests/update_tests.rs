//! Update and sync integration tests

mod common;

use common::TestRegistry;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const BUILD_V2: &str =
    "---\nname: Build\ndescription: Builds things\nversion: 1.3.0\nmodel_tier: high\n---\n# Build v2\n";

#[test]
fn test_update_nothing_to_do() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();

    registry
        .cmd()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_update_reinstalls_newer_versions() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();
    registry.write_package("agents/build.md", BUILD_V2);

    registry
        .cmd()
        .args(["update", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.2.0 -> 1.3.0"));
    assert_eq!(registry.read_database()["installed"]["agents"]["build"]["version"], "1.2.0");

    registry
        .cmd()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated 1 component(s)"));

    assert!(registry.read_target("agents/build.md").contains("# Build v2"));
    let db = registry.read_database();
    assert_eq!(db["installed"]["agents"]["build"]["version"], "1.3.0");
    assert_eq!(db["installed"]["skills"]["pdf"]["version"], "3.1.0");
    let logs = db["logs"]["installation"].as_array().unwrap();
    assert_eq!(logs.last().unwrap()["action"], "update");
    assert_eq!(logs.last().unwrap()["components"], serde_json::json!(["build"]));
}

#[test]
fn test_update_restores_missing_files() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();
    std::fs::remove_dir_all(registry.target.join("skills/pdf")).unwrap();

    registry
        .cmd()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing from target"));

    assert!(registry.target_exists("skills/pdf/SKILL.md"));
}

#[test]
fn test_update_unknown_component() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["update", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Component 'build' is not installed"));
}

#[test]
fn test_sync_records_hand_placed_components() {
    let registry = TestRegistry::new();
    std::fs::create_dir_all(registry.target.join("commands")).unwrap();
    std::fs::write(
        registry.target.join("commands/local.md"),
        "---\nversion: 0.3.0\n---\n# local\n",
    )
    .unwrap();

    registry
        .cmd()
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("local"))
        .stdout(predicate::str::contains("database not changed"));
    assert!(!registry.database_file.exists());

    registry.cmd().arg("sync").assert().success();
    let db = registry.read_database();
    assert_eq!(db["installed"]["commands"]["local"]["version"], "0.3.0");
}

#[test]
fn test_sync_twice_keeps_installed_content() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();

    registry.cmd().arg("sync").assert().success();
    let first = strip_timestamps(registry.read_database()["installed"].clone());
    registry.cmd().arg("sync").assert().success();
    let second = strip_timestamps(registry.read_database()["installed"].clone());

    assert_eq!(first, second);
}

fn strip_timestamps(mut installed: serde_json::Value) -> serde_json::Value {
    if let Some(buckets) = installed.as_object_mut() {
        for records in buckets.values_mut().filter_map(serde_json::Value::as_object_mut) {
            for record in records.values_mut().filter_map(serde_json::Value::as_object_mut) {
                record.remove("installedAt");
            }
        }
    }
    installed
}
