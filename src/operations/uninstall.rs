//! Uninstall operation
//!
//! Removal always works on the whole package: single components cannot be
//! removed on their own. `--all` clears the database, a bundle removal only
//! drops the bundle record and leaves the tracked components as they are.

use inquire::Confirm;
use tracing::{debug, info};

use crate::domain::DetectedComponents;
use crate::error::{RegistryError, Result};
use crate::installer::InstallOutcome;
use crate::registry::PACKAGE_NAME;

use super::context::{Context, backend};

/// What the user asked to remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallRequest {
    All,
    Bundle(String),
    Component(String),
}

/// Configuration options for uninstall
#[derive(Debug, Clone)]
pub struct UninstallOptions {
    pub request: UninstallRequest,
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub yes: bool,
}

/// What an uninstall did
#[derive(Debug)]
pub struct UninstallReport {
    pub method: &'static str,
    pub outcome: InstallOutcome,
    /// Components still present afterwards; `None` for dry runs
    pub remaining: Option<DetectedComponents>,
}

/// High-level uninstall operation
pub struct UninstallOperation<'a> {
    ctx: &'a mut Context,
    options: UninstallOptions,
}

impl<'a> UninstallOperation<'a> {
    pub fn new(ctx: &'a mut Context, options: UninstallOptions) -> Self {
        Self { ctx, options }
    }

    /// Ask before removing everything
    fn confirm_all(&self) -> Result<bool> {
        if self.options.yes || self.options.dry_run {
            return Ok(true);
        }
        let count = self.ctx.database.get_all_installed().len();
        println!("\n{count} installed component(s) will be removed.\n");

        Ok(Confirm::new("Uninstall all components?")
            .with_default(false)
            .with_help_message("Press 'y' to confirm, or Enter to cancel")
            .prompt()?)
    }

    /// Execute the uninstall
    pub fn execute(&mut self) -> Result<UninstallReport> {
        if let UninstallRequest::Component(id) = &self.options.request {
            return Err(RegistryError::NotSupported {
                feature: format!("uninstalling the single component '{id}'"),
                hint: "Use 'opencode-config uninstall --all' or '--group <name>'".to_string(),
            });
        }

        let registry = self.ctx.registry()?;
        match &self.options.request {
            UninstallRequest::Bundle(name) => {
                let bundle = registry.load_bundle(name)?;
                debug!("Bundle '{}' lists {} component(s)", bundle.name, bundle.components.len());
            }
            _ => {
                if !self.confirm_all()? {
                    return Err(RegistryError::Cancelled);
                }
            }
        }

        let target = self.ctx.installed_target_dir();
        let choice = self.ctx.installed_backend_choice()?;

        let Context {
            config, database, ..
        } = &mut *self.ctx;
        let backend = backend(config, choice, &registry, &target);
        let method = backend.method();

        let outcome = backend.uninstall_package(PACKAGE_NAME, self.options.dry_run)?;
        if self.options.dry_run {
            return Ok(UninstallReport {
                method,
                outcome,
                remaining: None,
            });
        }

        let status = if outcome.success() { "success" } else { "failed" };
        let remaining = backend.detect_installed_components();
        match &self.options.request {
            UninstallRequest::Bundle(name) => {
                if !database.remove_bundle(name)? {
                    debug!("Bundle '{name}' was not recorded in the database");
                }
                database.log_action("uninstall", std::slice::from_ref(name), method, status)?;
            }
            _ => {
                database.clear_installed()?;
                database.log_action("uninstall", &["all".to_string()], method, status)?;
            }
        }
        info!("Removed {} files", outcome.processed.len());

        Ok(UninstallReport {
            method,
            outcome,
            remaining: Some(remaining),
        })
    }
}
