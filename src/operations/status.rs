//! Status operation: a read-only snapshot of configuration, database and disk

use std::path::PathBuf;

use crate::domain::{DetectedComponents, ModelTier};
use crate::error::Result;

use super::context::{Context, backend};

/// One tracked component and whether its files are still present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedComponent {
    pub id: String,
    pub kind: crate::domain::ComponentKind,
    pub version: String,
    pub on_disk: bool,
}

/// Everything `status` shows
#[derive(Debug)]
pub struct StatusReport {
    pub target: PathBuf,
    /// `None` when no registry is configured or detectable
    pub registry: Option<PathBuf>,
    pub install_method: String,
    pub last_updated: String,
    pub tracked: Vec<TrackedComponent>,
    /// On disk but not tracked
    pub untracked: Vec<String>,
    pub bundles: Vec<String>,
    pub tiers: Vec<(ModelTier, Option<String>)>,
}

impl StatusReport {
    pub fn in_sync(&self) -> bool {
        self.untracked.is_empty() && self.tracked.iter().all(|c| c.on_disk)
    }
}

/// High-level status operation
pub struct StatusOperation<'a> {
    ctx: &'a Context,
}

impl<'a> StatusOperation<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Execute the status query
    pub fn execute(&self) -> Result<StatusReport> {
        let target = self.ctx.installed_target_dir();
        let registry = self.ctx.registry().ok();
        let db = &self.ctx.database;

        let on_disk = match &registry {
            Some(registry) => {
                let choice = self.ctx.installed_backend_choice()?;
                backend(&self.ctx.config, choice, registry, &target).detect_installed_components()
            }
            None => crate::installer::detection::scan(&target),
        };

        let tracked = db
            .get_all_installed()
            .into_iter()
            .map(|record| TrackedComponent {
                id: record.id.clone(),
                kind: record.kind,
                version: db.get_installed_version(&record.id).unwrap_or_default(),
                on_disk: on_disk.contains(&record.id),
            })
            .collect();
        let untracked = untracked(&on_disk, |id| db.is_installed(id));

        Ok(StatusReport {
            target,
            registry: registry.map(|r| r.root().to_path_buf()),
            install_method: db.install_method().to_string(),
            last_updated: db.last_updated().to_string(),
            tracked,
            untracked,
            bundles: db.bundles().map(|b| b.name.clone()).collect(),
            tiers: self.ctx.config.list_model_tiers(),
        })
    }
}

fn untracked(on_disk: &DetectedComponents, is_tracked: impl Fn(&str) -> bool) -> Vec<String> {
    on_disk
        .iter()
        .filter(|(_, id)| !is_tracked(id))
        .map(|(_, id)| id.to_string())
        .collect()
}
