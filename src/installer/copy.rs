//! Content-copy backend
//!
//! Copies every package file into the target directory. Markdown files have
//! their tier declaration rewritten and their placeholders resolved on the
//! way; everything else is copied byte for byte.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::Config;
use crate::domain::DetectedComponents;
use crate::error::{RegistryError, Result, read_failed, write_failed};
use crate::template::TemplateEngine;

use super::file_ops::{self, PackageFile};
use super::rewrite::rewrite_model;
use super::{InstallBackend, InstallOutcome, detection};

/// Install method recorded for copied content
pub const COPY_METHOD: &str = "copy";

/// Copies package content, resolving models as it goes
pub struct CopyBackend<'a> {
    registry: PathBuf,
    target: PathBuf,
    config: &'a Config,
}

impl<'a> CopyBackend<'a> {
    pub fn new(registry: impl Into<PathBuf>, target: impl Into<PathBuf>, config: &'a Config) -> Self {
        Self {
            registry: registry.into(),
            target: target.into(),
            config,
        }
    }

    /// Existing destinations are always overwritten
    fn can_overwrite(_dest: &Path) -> bool {
        true
    }

    /// Copy one file, returning warnings that did not stop it
    fn install_file(&self, source: &Path, dest: &Path, model_override: Option<&str>) -> Result<Vec<String>> {
        file_ops::ensure_parent_dir(dest)?;

        if !TemplateEngine::should_process_file(source) {
            fs::copy(source, dest).map_err(|e| write_failed(dest, &e))?;
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(source).map_err(|e| read_failed(source, &e))?;
        let engine = TemplateEngine::new(self.config);
        let rewrite = rewrite_model(&content, model_override, &engine);
        let mut warnings = rewrite.warnings;

        let content = match engine.process_content(&rewrite.content, &HashMap::new()) {
            Ok(processed) => processed,
            Err(e) => {
                warnings.push(e.to_string());
                rewrite.content
            }
        };

        fs::write(dest, content).map_err(|e| write_failed(dest, &e))?;
        Ok(warnings)
    }
}

impl InstallBackend for CopyBackend<'_> {
    fn method(&self) -> &'static str {
        COPY_METHOD
    }

    fn target(&self) -> &Path {
        &self.target
    }

    fn install_package(&self, package: &str, dry_run: bool, model_override: Option<&str>) -> Result<InstallOutcome> {
        let package_dir = self.registry.join(package);
        if !package_dir.is_dir() {
            return Err(RegistryError::PackageNotFound {
                path: package_dir.display().to_string(),
            });
        }

        if !dry_run {
            file_ops::ensure_base_dirs(&self.target)?;
        }

        let mut outcome = InstallOutcome::default();
        for file in file_ops::package_files(&package_dir) {
            let PackageFile { source, relative } = match file {
                Ok(file) => file,
                Err(e) => {
                    error!("{e}");
                    outcome.failures.push(e);
                    continue;
                }
            };
            let dest = self.target.join(&relative);

            if dry_run {
                outcome.processed.push(relative);
                continue;
            }

            if dest.exists() && !Self::can_overwrite(&dest) {
                warn!("{} exists, skipping", dest.display());
                continue;
            }

            match self.install_file(&source, &dest, model_override) {
                Ok(warnings) => {
                    for warning in warnings {
                        warn!("Warning processing {}: {warning}", relative.display());
                        outcome.warnings.push(format!("{}: {warning}", relative.display()));
                    }
                    debug!("Copied {}", relative.display());
                    outcome.processed.push(relative);
                }
                Err(e) => {
                    error!("Error copying {}: {e}", relative.display());
                    outcome.failures.push(e);
                }
            }
        }

        Ok(outcome)
    }

    fn uninstall_package(&self, package: &str, dry_run: bool) -> Result<InstallOutcome> {
        let package_dir = self.registry.join(package);
        let mut outcome = InstallOutcome::default();
        if !package_dir.is_dir() {
            warn!("Package directory not found: {}", package_dir.display());
            outcome
                .warnings
                .push(format!("Package directory not found: {}", package_dir.display()));
            return Ok(outcome);
        }

        for relative in file_ops::all_relative_files(&package_dir) {
            let dest = self.target.join(&relative);
            if !dest.exists() {
                continue;
            }
            if dry_run {
                outcome.processed.push(relative);
                continue;
            }
            match fs::remove_file(&dest) {
                Ok(()) => outcome.processed.push(relative),
                Err(e) => {
                    error!("Error removing {}: {e}", dest.display());
                    outcome.failures.push(write_failed(&dest, &e));
                }
            }
        }

        if !dry_run {
            file_ops::prune_empty_dirs(&self.target);
        }
        Ok(outcome)
    }

    fn detect_installed_components(&self) -> DetectedComponents {
        detection::scan(&self.target)
    }
}
