//! Common test utilities for opencode-config integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A registry, a target directory and isolated configuration and database files
#[allow(dead_code)]
pub struct TestRegistry {
    pub temp: TempDir,
    pub registry: PathBuf,
    pub target: PathBuf,
    pub config_file: PathBuf,
    pub database_file: PathBuf,
}

#[allow(dead_code)]
impl TestRegistry {
    /// Create a registry with a small package and a `basic` bundle
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let registry = temp.path().join("registry");
        let target = temp.path().join("target");
        let config_file = temp.path().join("home/.opencode-registry/config.json");
        let database_file = temp.path().join("installed.json");

        let fixture = Self {
            temp,
            registry,
            target,
            config_file,
            database_file,
        };
        fixture.write_package(
            "agents/build.md",
            "---\nname: Build\ndescription: Builds things\nversion: 1.2.0\nmodel_tier: high\ntags: [core]\n---\n# Build\n",
        );
        fixture.write_package("agents/_shared/common.md", "shared\n");
        fixture.write_package(
            "agents/subagents/review/code-reviewer.md",
            "---\nname: Code Reviewer\ndescription: Reviews code\nversion: 2.0.0\nmodel_tier: \"low\"\ntags: [review, core]\n---\nUse {{tier:medium}} for hard cases\n",
        );
        fixture.write_package(
            "skills/pdf/SKILL.md",
            "---\nname: pdf\ndescription: PDF tools\nmetadata:\n  version: 3.1.0\n---\nPDF\n",
        );
        fixture.write_package("skills/pdf/scripts/extract.py", "print('extract')\n");
        fixture.write_package("skills/pdf/__pycache__/extract.pyc", "cache");
        fixture.write_package(
            "commands/deploy.md",
            "---\ndescription: Deploy\n---\nRun with {{model:vendorZ/fixed}}\n",
        );
        fixture.write_registry(
            "bundles/basic.yaml",
            "name: Basic\ndescription: Starter set\ncomponents:\n  - build\n  - pdf\n",
        );
        fixture.write_config(&serde_json::json!({}));
        fixture
    }

    /// Write a file below `<registry>/opencode`
    pub fn write_package(&self, rel: &str, content: &str) {
        write(&self.registry.join("opencode").join(rel), content);
    }

    /// Write a file below the registry root
    pub fn write_registry(&self, rel: &str, content: &str) {
        write(&self.registry.join(rel), content);
    }

    /// Write the configuration, always pointing at this registry and target
    pub fn write_config(&self, extra: &serde_json::Value) {
        let mut config = serde_json::json!({
            "target": self.target,
            "registry_path": self.registry,
        });
        if let (Some(config), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
            for (key, value) in extra {
                config.insert(key.clone(), value.clone());
            }
        }
        write(
            &self.config_file,
            &serde_json::to_string_pretty(&config).expect("Failed to serialize config"),
        );
    }

    /// Configure every tier as `<prefix>/<tier>`
    pub fn configure_tiers(&self, prefix: &str) {
        self.write_config(&serde_json::json!({
            "model_tiers": {
                "high": format!("{prefix}/high"),
                "medium": format!("{prefix}/medium"),
                "low": format!("{prefix}/low"),
                "free": format!("{prefix}/free"),
            }
        }));
    }

    pub fn read_target(&self, rel: &str) -> String {
        std::fs::read_to_string(self.target.join(rel)).expect("Failed to read target file")
    }

    pub fn target_exists(&self, rel: &str) -> bool {
        self.target.join(rel).exists()
    }

    pub fn read_config(&self) -> serde_json::Value {
        read_json(&self.config_file)
    }

    pub fn read_database(&self) -> serde_json::Value {
        read_json(&self.database_file)
    }

    /// Ids recorded under `installed.<bucket>`
    pub fn installed_ids(&self, bucket: &str) -> Vec<String> {
        self.read_database()["installed"][bucket]
            .as_object()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The binary, isolated to this fixture's files
    pub fn cmd(&self) -> Command {
        let mut cmd = opencode_config_cmd();
        cmd.current_dir(self.temp.path())
            .env("HOME", self.temp.path().join("home"))
            .env("OPENCODE_CONFIG_FILE", &self.config_file)
            .env("OPENCODE_REGISTRY_DB", &self.database_file)
            .env("RUST_LOG", "off")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run `install --group basic` and assert it succeeded
    pub fn install_basic(&self) {
        self.cmd()
            .args(["install", "--group", "basic"])
            .assert()
            .success();
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn opencode_config_cmd() -> Command {
    Command::cargo_bin("opencode-config").expect("Failed to find opencode-config binary")
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn read_json(path: &Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("Failed to read JSON file");
    serde_json::from_str(&content).expect("Failed to parse JSON file")
}
