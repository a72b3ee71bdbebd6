//! Install operation
//!
//! Installs the registry package into the target directory and reconciles the
//! database from what ends up on disk. Installing a bundle or a single
//! component still installs the whole package; the request only decides what
//! gets checked beforehand and what is recorded.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{BackendChoice, BundleDefinition};
use crate::domain::{DetectedComponents, ModelTier};
use crate::error::{RegistryError, Result};
use crate::installer::InstallOutcome;
use crate::registry::PACKAGE_NAME;

use super::context::{Context, backend};

/// What the user asked to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallRequest {
    Bundle(String),
    Component(String),
}

/// Configuration options for installation
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub request: InstallRequest,
    pub dry_run: bool,
    pub target: Option<PathBuf>,
    /// Literal model written into every installed file instead of tier resolution
    pub model: Option<String>,
    /// Backend override; the configuration decides when absent
    pub method: Option<BackendChoice>,
}

/// What an install did
#[derive(Debug)]
pub struct InstallReport {
    pub method: &'static str,
    pub target: PathBuf,
    pub registry: PathBuf,
    pub bundle: Option<BundleDefinition>,
    pub outcome: InstallOutcome,
    /// Components found after installing; `None` for dry runs and failures
    pub detected: Option<DetectedComponents>,
}

impl InstallReport {
    pub fn success(&self) -> bool {
        self.outcome.success()
    }
}

/// Commands that configure the missing tiers, one per line
pub fn tier_setup_hint(missing: &[ModelTier]) -> String {
    let mut lines: Vec<String> = missing
        .iter()
        .map(|tier| format!("opencode-config models --set {tier} {}", tier.example_model()))
        .collect();
    lines.push("Browse available models at https://models.dev/ or run 'opencode models'".to_string());
    lines.join("\n")
}

/// High-level install operation
pub struct InstallOperation<'a> {
    ctx: &'a mut Context,
    options: InstallOptions,
}

impl<'a> InstallOperation<'a> {
    pub fn new(ctx: &'a mut Context, options: InstallOptions) -> Self {
        Self { ctx, options }
    }

    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Every tier must have a model unless an override replaces resolution.
    ///
    /// Linked installs never rewrite files and skip this check.
    fn check_model_tiers(&self) -> Result<()> {
        if self.options.model.is_some() || self.options.dry_run {
            return Ok(());
        }
        let missing = self.ctx.config.missing_tiers();
        if missing.is_empty() {
            return Ok(());
        }
        Err(RegistryError::TiersNotConfigured {
            missing: missing.iter().map(ToString::to_string).collect(),
            hint: tier_setup_hint(&missing),
        })
    }

    /// Execute the install
    pub fn execute(&mut self) -> Result<InstallReport> {
        let registry = self.ctx.registry()?;
        let choice = match self.options.method {
            Some(choice) => choice,
            None => self.ctx.config.backend_choice()?,
        };
        if choice != BackendChoice::Link {
            self.check_model_tiers()?;
        }

        let bundle = match &self.options.request {
            InstallRequest::Bundle(name) => Some(registry.load_bundle(name)?),
            InstallRequest::Component(id) => {
                if registry.find_any(id).is_none() {
                    return Err(RegistryError::ComponentNotFound { id: id.clone() });
                }
                if !self.options.dry_run && self.ctx.database.is_installed(id) {
                    return Err(RegistryError::AlreadyInstalled { id: id.clone() });
                }
                None
            }
        };

        let target = self.ctx.target_dir(self.options.target.as_deref());

        let Context {
            config, database, ..
        } = &mut *self.ctx;
        let backend = backend(config, choice, &registry, &target);
        let method = backend.method();
        debug!(
            "Installing {PACKAGE_NAME} from {} into {} ({method})",
            registry.root().display(),
            target.display()
        );

        let outcome = backend.install_package(PACKAGE_NAME, self.options.dry_run, self.options.model.as_deref())?;

        let mut detected = None;
        if !self.options.dry_run {
            let label = match &self.options.request {
                InstallRequest::Bundle(name) | InstallRequest::Component(name) => name.clone(),
            };

            if outcome.success() {
                database.set_install_method(method)?;
                database.set_target_directory(&target)?;
                database.set_registry_path(registry.root())?;
                if let (Some(bundle), InstallRequest::Bundle(name)) = (&bundle, &self.options.request) {
                    database.add_bundle(name, &bundle.components)?;
                }

                let found = backend.detect_installed_components();
                let versions = registry.collect_versions(&found);
                database.sync_from_detected(&found, method, Some(&versions))?;
                database.log_action("install", &[label], method, "success")?;
                info!("Installed {} components", found.len());
                detected = Some(found);
            } else {
                database.log_action("install", &[label], method, "failed")?;
            }
        }

        Ok(InstallReport {
            method,
            target,
            registry: registry.root().to_path_buf(),
            bundle,
            outcome,
            detected,
        })
    }
}
