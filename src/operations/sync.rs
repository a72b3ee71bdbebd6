//! Sync operation
//!
//! Rebuilds the installed database from the target directory without
//! touching any files.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::domain::DetectedComponents;
use crate::error::Result;
use crate::installer::detection;
use crate::manifest::ManifestParser;

use super::context::{Context, backend};

/// Configuration options for sync
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    pub dry_run: bool,
}

/// What sync found
#[derive(Debug)]
pub struct SyncReport {
    pub method: &'static str,
    pub detected: DetectedComponents,
    /// Versions read from installed files, keyed by id
    pub versions: HashMap<String, String>,
    /// Tracked before the sync but no longer on disk
    pub removed: Vec<String>,
    /// On disk but not tracked before the sync
    pub added: Vec<String>,
}

/// Versions declared in the installed copies of `detected`
pub fn installed_versions(target: &Path, detected: &DetectedComponents) -> HashMap<String, String> {
    detected
        .iter()
        .filter_map(|(kind, id)| {
            let manifest = detection::find_manifest(target, kind, id)?;
            match ManifestParser::parse_frontmatter(&manifest) {
                Ok(frontmatter) => frontmatter
                    .map(|fm| (id.to_string(), ManifestParser::extract_version(&fm, kind))),
                Err(e) => {
                    debug!("Could not read {}: {e}", manifest.display());
                    None
                }
            }
        })
        .collect()
}

/// High-level sync operation
pub struct SyncOperation<'a> {
    ctx: &'a mut Context,
    options: SyncOptions,
}

impl<'a> SyncOperation<'a> {
    pub fn new(ctx: &'a mut Context, options: SyncOptions) -> Self {
        Self { ctx, options }
    }

    /// Execute the sync
    pub fn execute(&mut self) -> Result<SyncReport> {
        let registry = self.ctx.registry()?;
        let target = self.ctx.installed_target_dir();
        let choice = self.ctx.installed_backend_choice()?;

        let Context {
            config, database, ..
        } = &mut *self.ctx;
        let backend = backend(config, choice, &registry, &target);
        let method = backend.method();

        let detected = backend.detect_installed_components();
        let versions = installed_versions(&target, &detected);

        let before = database.installed_ids();
        let removed = before
            .iter()
            .filter(|(_, id)| !detected.contains(id))
            .map(|(_, id)| id.to_string())
            .collect();
        let added = detected
            .iter()
            .filter(|(_, id)| !before.contains(id))
            .map(|(_, id)| id.to_string())
            .collect();

        if !self.options.dry_run {
            database.sync_from_detected(&detected, method, Some(&versions))?;
        }

        Ok(SyncReport {
            method,
            detected,
            versions,
            removed,
            added,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComponentKind;
    use crate::operations::test_support::{TestEnv, write};
    use pretty_assertions::assert_eq;

    fn env_with_target() -> TestEnv {
        let env = TestEnv::new();
        let target = env.target();
        write(&target, "agents/build.md", "---\nversion: 1.4.0\nmodel: x/y\n---\n");
        write(&target, "skills/pdf/SKILL.md", "---\nmetadata:\n  version: 3.0.0\n---\n");
        write(&target, "commands/local.md", "# no frontmatter\n");
        env
    }

    #[test]
    fn test_sync_records_disk_state_with_versions() {
        let mut env = env_with_target();
        env.ctx
            .database
            .add_component(ComponentKind::Command, "gone", Some("1.0.0"), "copy")
            .unwrap();

        let report = SyncOperation::new(&mut env.ctx, SyncOptions::default())
            .execute()
            .unwrap();

        assert_eq!(report.removed, vec!["gone"]);
        assert_eq!(report.added, vec!["build", "pdf", "local"]);
        let db = &env.ctx.database;
        assert!(!db.is_installed("gone"));
        assert_eq!(db.get_installed_version("build").as_deref(), Some("1.4.0"));
        assert_eq!(db.get_installed_version("pdf").as_deref(), Some("3.0.0"));
        assert_eq!(db.get_installed_version("local").as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_sync_dry_run_leaves_database() {
        let mut env = env_with_target();
        let report = SyncOperation::new(&mut env.ctx, SyncOptions { dry_run: true })
            .execute()
            .unwrap();
        assert_eq!(report.detected.len(), 3);
        assert!(env.ctx.database.get_all_installed().is_empty());
    }

    #[test]
    fn test_sync_twice_is_stable() {
        let mut env = env_with_target();
        SyncOperation::new(&mut env.ctx, SyncOptions::default()).execute().unwrap();
        let first = env.ctx.database.installed_ids();
        let report = SyncOperation::new(&mut env.ctx, SyncOptions::default()).execute().unwrap();
        assert_eq!(env.ctx.database.installed_ids(), first);
        assert!(report.added.is_empty() && report.removed.is_empty());
    }
}
