//! Model tier and configuration command tests

mod common;

use common::TestRegistry;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_models_set_and_list() {
    let registry = TestRegistry::new();

    registry
        .cmd()
        .args(["models", "--set", "low", "vendorA/cheap"])
        .assert()
        .success();
    assert_eq!(registry.read_config()["model_tiers"]["low"], "vendorA/cheap");

    registry
        .cmd()
        .arg("models")
        .assert()
        .success()
        .stdout(predicate::str::contains("vendorA/cheap"))
        .stdout(predicate::str::contains("opencode-config models --set high"));
}

#[test]
fn test_models_invalid_tier() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["models", "--set", "ultra", "x/y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tier 'ultra'"));
}

#[test]
fn test_models_reset() {
    let registry = TestRegistry::new();
    registry.configure_tiers("vendorA");

    registry.cmd().args(["models", "--reset"]).assert().success();

    let tiers = registry.read_config()["model_tiers"].clone();
    for tier in ["high", "medium", "low", "free"] {
        assert!(tiers[tier].is_null(), "{tier} still set");
    }
}

#[test]
fn test_tier_set_via_cli_drives_install() {
    let registry = TestRegistry::new();
    for (tier, model) in [
        ("high", "vendorA/big"),
        ("medium", "vendorA/mid"),
        ("low", "vendorA/cheap"),
        ("free", "vendorA/free"),
    ] {
        registry
            .cmd()
            .args(["models", "--set", tier, model])
            .assert()
            .success();
    }
    registry.install_basic();

    let reviewer = registry.read_target("agents/subagents/review/code-reviewer.md");
    assert!(reviewer.contains("model: vendorA/cheap"));
    assert!(!reviewer.contains("model_tier"));
}

#[test]
fn test_config_set_and_list() {
    let registry = TestRegistry::new();
    let target = registry.temp.path().join("new-target");

    registry
        .cmd()
        .args(["config", "--target"])
        .arg(&target)
        .args(["--method", "link"])
        .assert()
        .success();

    let config = registry.read_config();
    assert_eq!(config["target"].as_str().map(std::path::PathBuf::from), Some(target));
    assert_eq!(config["install_method"], "link");

    registry
        .cmd()
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("install_method"))
        .stdout(predicate::str::contains("link"));
}

#[test]
fn test_config_registry_auto() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["config", "--registry", "auto"])
        .assert()
        .success();
    assert!(registry.read_config()["registry_path"].is_null());
}

#[test]
fn test_config_expands_home() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["config", "--target", "~/oc"])
        .assert()
        .success();

    let expected = registry.temp.path().join("home").join("oc");
    assert_eq!(
        registry.read_config()["target"].as_str().map(std::path::PathBuf::from),
        Some(expected)
    );
}

#[cfg(unix)]
#[test]
fn test_links_reports_and_cleans_broken_links() {
    let registry = TestRegistry::new();
    registry
        .cmd()
        .args(["install", "--group", "basic", "--method", "link"])
        .env("PATH", "")
        .assert()
        .success();
    std::fs::remove_file(registry.registry.join("opencode/commands/deploy.md")).unwrap();

    registry
        .cmd()
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("Broken links: 1"))
        .stdout(predicate::str::contains("deploy.md"));

    registry
        .cmd()
        .args(["links", "--clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 1 broken link(s)"));

    registry
        .cmd()
        .arg("links")
        .assert()
        .success()
        .stdout(predicate::str::contains("No broken links"));
}
