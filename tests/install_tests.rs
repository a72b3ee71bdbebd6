//! Install integration tests

mod common;

use common::TestRegistry;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_install_requires_configured_tiers() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["install", "--group", "basic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model tiers are not fully configured"))
        .stderr(predicate::str::contains("opencode-config models --set high"));

    assert!(!registry.target.exists());
}

#[test]
fn test_install_bundle_copies_and_records() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");

    registry
        .cmd()
        .args(["install", "--group", "basic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed bundle 'basic'"));

    let build = registry.read_target("agents/build.md");
    assert!(build.contains("model: vendorA/high"));
    assert!(!build.contains("model_tier"));

    let reviewer = registry.read_target("agents/subagents/review/code-reviewer.md");
    assert!(reviewer.contains("model: vendorA/low"));
    assert!(reviewer.contains("Use vendorA/medium for hard cases"));

    assert!(registry.read_target("commands/deploy.md").contains("Run with vendorZ/fixed"));
    assert!(registry.target_exists("skills/pdf/scripts/extract.py"));
    assert!(!registry.target_exists("skills/pdf/__pycache__"));

    assert_eq!(registry.installed_ids("agents"), vec!["build"]);
    assert_eq!(registry.installed_ids("subagents"), vec!["code-reviewer"]);
    assert_eq!(registry.installed_ids("skills"), vec!["pdf"]);
    assert_eq!(registry.installed_ids("commands"), vec!["deploy"]);

    let db = registry.read_database();
    assert_eq!(db["installMethod"], "copy");
    assert_eq!(db["installed"]["agents"]["build"]["version"], "1.2.0");
    assert_eq!(db["installed"]["agents"]["build"]["type"], "agent");
    assert_eq!(db["installed"]["skills"]["pdf"]["version"], "3.1.0");
    assert_eq!(db["bundles"]["basic"]["components"], serde_json::json!(["build", "pdf"]));
    assert_eq!(db["logs"]["installation"][0]["action"], "install");
    assert_eq!(db["logs"]["installation"][0]["status"], "success");
    assert_eq!(
        db["targetDirectory"].as_str().map(std::path::PathBuf::from),
        Some(registry.target.clone())
    );
}

#[test]
fn test_install_does_not_persist_into_config() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    let before = registry.read_config();

    registry
        .cmd()
        .args(["install", "--group", "basic", "--method", "copy"])
        .assert()
        .success();

    assert_eq!(registry.read_config(), before);
}

#[test]
fn test_install_dry_run_changes_nothing() {
    let registry = TestRegistry::new();

    registry
        .cmd()
        .args(["install", "--group", "basic", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would copy:"))
        .stdout(predicate::str::contains("agents/build.md"))
        .stdout(predicate::str::contains("__pycache__").not());

    assert!(!registry.target.exists());
    assert!(!registry.database_file.exists());
}

#[test]
fn test_install_with_model_override() {
    let registry = TestRegistry::new();

    registry
        .cmd()
        .args(["install", "code-reviewer", "--model", "custom/model"])
        .assert()
        .success();

    let reviewer = registry.read_target("agents/subagents/review/code-reviewer.md");
    assert!(reviewer.contains("model: custom/model"));
    assert!(!reviewer.contains("model_tier"));
    assert!(registry.read_target("skills/pdf/SKILL.md").contains("model: custom/model"));
}

#[test]
fn test_install_into_explicit_target() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    let other = registry.temp.path().join("elsewhere");

    registry
        .cmd()
        .args(["install", "--group", "basic", "--target"])
        .arg(&other)
        .assert()
        .success();

    assert!(other.join("agents/build.md").exists());
    assert!(!registry.target.exists());
}

#[test]
fn test_reinstall_uses_new_tier_configuration() {
    let registry = TestRegistry::new();
    registry.configure_tiers("first");
    registry.install_basic();
    assert!(registry.read_target("agents/build.md").contains("model: first/high"));

    registry.configure_tiers("second");
    registry
        .cmd()
        .args(["install", "--group", "basic"])
        .assert()
        .success();

    let build = registry.read_target("agents/build.md");
    assert!(build.contains("model: second/high"));
    assert!(!build.contains("first/high"));
}

#[test]
fn test_install_unknown_component_and_bundle() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");

    registry
        .cmd()
        .args(["install", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Component 'missing' not found"));

    registry
        .cmd()
        .args(["install", "--group", "expert"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bundle 'expert' not found"));
}

#[test]
fn test_install_installed_component_suggests_update() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();

    registry
        .cmd()
        .args(["install", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already installed"))
        .stderr(predicate::str::contains("opencode-config update"));
}

#[test]
fn test_status_after_install() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");
    registry.install_basic();

    registry
        .cmd()
        .args(["status", "--details"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed components: 4"))
        .stdout(predicate::str::contains("code-reviewer"))
        .stdout(predicate::str::contains("Out of sync").not());
}

#[cfg(unix)]
#[test]
fn test_install_with_link_method() {
    let registry = TestRegistry::new();

    registry
        .cmd()
        .args(["install", "--group", "basic", "--method", "link"])
        .env("PATH", "")
        .assert()
        .success();

    let link = registry.target.join("agents/build.md");
    assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
    assert!(registry.read_target("agents/build.md").contains("model_tier: high"));
    assert_eq!(registry.read_database()["installMethod"], "symlink");
    assert_eq!(registry.installed_ids("agents"), vec!["build"]);
}
