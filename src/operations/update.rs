//! Update operation
//!
//! Compares what the database tracks against the target directory and the
//! registry. When anything is missing or outdated the whole package is
//! reinstalled and the database rebuilt from disk.

use tracing::{debug, info};

use crate::database::{InstalledDatabase, UNKNOWN_VERSION};
use crate::domain::{ComponentKind, DetectedComponents};
use crate::error::{RegistryError, Result};
use crate::installer::{InstallBackend, InstallOutcome};
use crate::registry::{PACKAGE_NAME, Registry};
use crate::version::is_newer_version;

use super::context::{Context, backend};

/// Configuration options for update
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Only consider this component; every tracked component when `None`
    pub component: Option<String>,
    pub dry_run: bool,
}

/// A tracked component with a newer registry version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpdate {
    pub id: String,
    pub kind: ComponentKind,
    pub installed: String,
    pub available: String,
}

/// What update found before acting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Tracked in the database but absent from the target
    pub missing: Vec<String>,
    pub updates: Vec<PendingUpdate>,
}

impl UpdatePlan {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.updates.is_empty()
    }

    /// Ids the update will touch, missing ones first
    pub fn affected_ids(&self) -> Vec<String> {
        self.missing
            .iter()
            .cloned()
            .chain(self.updates.iter().map(|u| u.id.clone()))
            .collect()
    }
}

/// What an update did
#[derive(Debug)]
pub struct UpdateReport {
    pub method: &'static str,
    pub plan: UpdatePlan,
    /// Install outcome of the reinstall; `None` when nothing was applied
    pub outcome: Option<InstallOutcome>,
    pub detected: Option<DetectedComponents>,
}

impl UpdateReport {
    pub fn applied(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn success(&self) -> bool {
        self.outcome.as_ref().is_none_or(InstallOutcome::success)
    }
}

/// High-level update operation
pub struct UpdateOperation<'a> {
    ctx: &'a mut Context,
    options: UpdateOptions,
}

impl<'a> UpdateOperation<'a> {
    pub fn new(ctx: &'a mut Context, options: UpdateOptions) -> Self {
        Self { ctx, options }
    }

    /// Execute the update
    pub fn execute(&mut self) -> Result<UpdateReport> {
        if let Some(id) = &self.options.component {
            if !self.ctx.database.is_installed(id) {
                return Err(RegistryError::ComponentNotInstalled { id: id.clone() });
            }
        }

        let registry = self.ctx.registry()?;
        let target = self.ctx.installed_target_dir();
        let choice = self.ctx.installed_backend_choice()?;

        let Context {
            config, database, ..
        } = &mut *self.ctx;
        let backend = backend(config, choice, &registry, &target);
        let method = backend.method();

        let plan = plan(database, &registry, backend.as_ref(), self.options.component.as_deref());
        if plan.is_empty() || self.options.dry_run {
            debug!("Update plan: {plan:?}");
            return Ok(UpdateReport {
                method,
                plan,
                outcome: None,
                detected: None,
            });
        }

        let removed = backend.uninstall_package(PACKAGE_NAME, false)?;
        let mut outcome = backend.install_package(PACKAGE_NAME, false, None)?;
        outcome.warnings.splice(0..0, removed.warnings);
        outcome.failures.splice(0..0, removed.failures);

        let affected = plan.affected_ids();
        let mut detected = None;
        if outcome.success() {
            let found = backend.detect_installed_components();
            let versions = registry.collect_versions(&found);
            database.sync_from_detected(&found, method, Some(&versions))?;
            database.log_action("update", &affected, method, "success")?;
            info!("Updated {} components", affected.len());
            detected = Some(found);
        } else {
            database.log_action("update", &affected, method, "failed")?;
        }

        Ok(UpdateReport {
            method,
            plan,
            outcome: Some(outcome),
            detected,
        })
    }
}

/// Compare tracked components against the target and the registry.
///
/// Components with an unknown installed version, or that the registry no
/// longer offers, are never listed as updates.
fn plan(
    database: &InstalledDatabase,
    registry: &Registry,
    backend: &dyn InstallBackend,
    only: Option<&str>,
) -> UpdatePlan {
    let on_disk = backend.detect_installed_components();
    let mut plan = UpdatePlan::default();

    for record in database.get_all_installed() {
        if only.is_some_and(|id| id != record.id) {
            continue;
        }

        if !on_disk.contains(&record.id) {
            plan.missing.push(record.id.clone());
            continue;
        }

        let installed = database
            .get_installed_version(&record.id)
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
        if installed == UNKNOWN_VERSION {
            continue;
        }
        let Some(available) = registry.available_version(record.kind, &record.id) else {
            continue;
        };
        if is_newer_version(&available, &installed) {
            plan.updates.push(PendingUpdate {
                id: record.id.clone(),
                kind: record.kind,
                installed,
                available,
            });
        }
    }
    plan
}
