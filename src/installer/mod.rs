//! Installation backends
//!
//! A backend materializes a registry package in the target directory, removes
//! it again and reports which components the target currently holds. Two
//! backends exist:
//! - [`CopyBackend`]: copies files, rewriting model tiers into concrete models
//! - [`LinkBackend`]: links files back into the registry (Stow or plain symlinks)
//!
//! The backend is chosen once per invocation by [`select`].

pub mod copy;
pub mod detection;
pub mod file_ops;
pub mod link;
pub mod rewrite;

use std::path::{Path, PathBuf};

use crate::config::{BackendChoice, Config};
use crate::domain::DetectedComponents;
use crate::error::{RegistryError, Result};

pub use copy::CopyBackend;
pub use link::{LinkBackend, LinkStrategy};

/// What a backend did for one package.
///
/// Per-file failures are collected rather than returned early; the operation
/// succeeded only when `failures` is empty.
#[derive(Debug, Default)]
pub struct InstallOutcome {
    /// Package-relative paths copied, linked or removed (or that would be in a dry run)
    pub processed: Vec<PathBuf>,
    pub warnings: Vec<String>,
    pub failures: Vec<RegistryError>,
}

impl InstallOutcome {
    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A strategy for materializing packages in a target directory
pub trait InstallBackend {
    /// Install method recorded in the database (`copy`, `stow` or `symlink`)
    fn method(&self) -> &'static str;

    fn target(&self) -> &Path;

    /// Install every file of `<registry>/<package>` into the target
    fn install_package(&self, package: &str, dry_run: bool, model_override: Option<&str>) -> Result<InstallOutcome>;

    /// Remove the files of `<registry>/<package>` from the target
    fn uninstall_package(&self, package: &str, dry_run: bool) -> Result<InstallOutcome>;

    /// Components present in the target, derived from its directory shape
    fn detect_installed_components(&self) -> DetectedComponents;
}

/// Build the backend for `choice`; `Auto` means copy.
pub fn select<'a>(
    choice: BackendChoice,
    registry: &Path,
    target: &Path,
    config: &'a Config,
) -> Box<dyn InstallBackend + 'a> {
    match choice {
        BackendChoice::Auto | BackendChoice::Copy => Box::new(CopyBackend::new(registry, target, config)),
        BackendChoice::Link => Box::new(LinkBackend::new(registry, target)),
    }
}
