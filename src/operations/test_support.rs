//! Shared fixture for operation tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Config;
use crate::database::InstalledDatabase;
use crate::domain::ModelTier;

use super::context::Context;

/// A registry, an empty target and a fresh configuration and database
pub struct TestEnv {
    pub temp: TempDir,
    pub ctx: Context,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let registry = temp.path().join("registry");
        let files = [
            ("opencode/agents/build.md", "---\nname: Build\nversion: 1.2.0\nmodel_tier: high\n---\n# Build\n"),
            (
                "opencode/agents/subagents/review/code-reviewer.md",
                "---\nname: Reviewer\nversion: 2.0.0\nmodel_tier: low\n---\nReview\n",
            ),
            ("opencode/skills/pdf/SKILL.md", "---\nname: pdf\nmetadata:\n  version: 3.1.0\n---\nPDF\n"),
            ("opencode/commands/deploy.md", "---\ndescription: Deploy\n---\nRun\n"),
            ("bundles/basic.yaml", "name: Basic\ndescription: Starter set\ncomponents: [build, pdf]\n"),
        ];
        for (rel, content) in files {
            write(&registry, rel, content);
        }

        let mut config = Config::load(temp.path().join("config.json")).unwrap();
        config.set_registry_path(Some(&registry)).unwrap();
        config.set_target(&temp.path().join("target")).unwrap();
        let database = InstalledDatabase::load(temp.path().join("installed.json")).unwrap();
        let ctx = Context::new(config, database, temp.path());

        Self { temp, ctx }
    }

    pub fn registry(&self) -> PathBuf {
        self.temp.path().join("registry")
    }

    pub fn target(&self) -> PathBuf {
        self.temp.path().join("target")
    }

    /// Overwrite a file inside the registry package
    pub fn write_package(&self, rel: &str, content: &str) {
        write(&self.registry().join("opencode"), rel, content);
    }
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Configure every tier as `<prefix>/<tier>`
pub fn all_tiers(ctx: &mut Context, prefix: &str) {
    for tier in ModelTier::ALL {
        ctx.config
            .set_model_tier(tier, Some(&format!("{prefix}/{tier}")))
            .unwrap();
    }
}
