//! Link backend
//!
//! Materializes a package as symbolic links into the registry. GNU Stow is
//! used when it is on `PATH`; otherwise one link per file is created with the
//! same layout. Linked content is never rewritten, so tier declarations stay
//! as authored.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::domain::DetectedComponents;
use crate::error::{RegistryError, Result, write_failed};

use super::file_ops::{self, PackageFile, is_symlink};
use super::{InstallBackend, InstallOutcome, detection};

/// External tool used when available
pub const STOW: &str = "stow";

/// How links are created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStrategy {
    /// Delegate to GNU Stow
    Stow,
    /// Create per-file symbolic links
    Symlink,
}

impl LinkStrategy {
    /// Use Stow when it can be found on `PATH`
    pub fn probe() -> Self {
        match which::which(STOW) {
            Ok(path) => {
                debug!("Found {STOW} at {}", path.display());
                LinkStrategy::Stow
            }
            Err(_) => LinkStrategy::Symlink,
        }
    }

    /// Install method recorded in the database
    pub fn method(self) -> &'static str {
        match self {
            LinkStrategy::Stow => "stow",
            LinkStrategy::Symlink => "symlink",
        }
    }
}

#[cfg(unix)]
fn symlink_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn symlink_file(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(source, dest)
}

/// Links package content into the target directory
pub struct LinkBackend {
    registry: PathBuf,
    target: PathBuf,
    strategy: LinkStrategy,
}

impl LinkBackend {
    /// Create a backend, probing for Stow once
    pub fn new(registry: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self::with_strategy(registry, target, LinkStrategy::probe())
    }

    pub fn with_strategy(registry: impl Into<PathBuf>, target: impl Into<PathBuf>, strategy: LinkStrategy) -> Self {
        Self {
            registry: registry.into(),
            target: target.into(),
            strategy,
        }
    }

    pub fn strategy(&self) -> LinkStrategy {
        self.strategy
    }

    fn run_stow(&self, package: &str, delete: bool, dry_run: bool) -> Result<InstallOutcome> {
        let mut command = Command::new(STOW);
        command
            .arg("--dir")
            .arg(&self.registry)
            .arg("--target")
            .arg(&self.target);
        if delete {
            command.arg("-D");
        }
        command.arg(package);
        if dry_run {
            command.arg("--simulate");
        }

        debug!("Running {command:?}");
        let output = command.output().map_err(|e| RegistryError::IoError {
            message: format!("failed to run {STOW}: {e}"),
        })?;

        let mut outcome = InstallOutcome::default();
        if output.status.success() {
            let report = String::from_utf8_lossy(&output.stderr);
            if dry_run && !report.trim().is_empty() {
                info!("{}", report.trim());
            }
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Error using {STOW}: {stderr}");
            outcome.failures.push(RegistryError::LinkToolFailed { stderr });
        }
        Ok(outcome)
    }

    fn link_files(&self, package_dir: &Path, dry_run: bool) -> InstallOutcome {
        let mut outcome = InstallOutcome::default();
        for file in file_ops::package_files(package_dir) {
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

            if dest.exists() && !is_symlink(&dest) {
                let message = format!("{} exists and is not a symlink, skipping", dest.display());
                warn!("{message}");
                outcome.warnings.push(message);
                continue;
            }

            let linked = file_ops::ensure_parent_dir(&dest).and_then(|()| {
                if is_symlink(&dest) {
                    fs::remove_file(&dest).map_err(|e| write_failed(&dest, &e))?;
                }
                symlink_file(&source, &dest).map_err(|e| write_failed(&dest, &e))
            });
            match linked {
                Ok(()) => {
                    debug!("Linked {} -> {}", dest.display(), source.display());
                    outcome.processed.push(relative);
                }
                Err(e) => {
                    error!("Error linking {}: {e}", relative.display());
                    outcome.failures.push(e);
                }
            }
        }
        outcome
    }

    fn unlink_files(&self, package_dir: &Path, dry_run: bool) -> InstallOutcome {
        let mut outcome = InstallOutcome::default();
        for relative in file_ops::all_relative_files(package_dir) {
            let source = package_dir.join(&relative);
            let dest = self.target.join(&relative);
            if !is_symlink(&dest) || !points_to(&dest, &source) {
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
        outcome
    }

    /// Symbolic links in the target whose destination no longer exists
    pub fn verify_symlinks(&self) -> Vec<PathBuf> {
        if !self.target.is_dir() {
            return Vec::new();
        }
        WalkDir::new(&self.target)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path_is_symlink() && !entry.path().exists())
            .map(walkdir::DirEntry::into_path)
            .collect()
    }

    /// Remove broken links, returning how many were (or would be) removed
    pub fn clean_broken_symlinks(&self, dry_run: bool) -> Result<usize> {
        let broken = self.verify_symlinks();
        if !dry_run {
            for link in &broken {
                fs::remove_file(link).map_err(|e| write_failed(link, &e))?;
                debug!("Removed broken link {}", link.display());
            }
        }
        Ok(broken.len())
    }
}

/// True when the link at `link` resolves to the same file as `source`
fn points_to(link: &Path, source: &Path) -> bool {
    match (dunce::canonicalize(link), dunce::canonicalize(source)) {
        (Ok(resolved), Ok(expected)) => resolved == expected,
        _ => false,
    }
}

impl InstallBackend for LinkBackend {
    fn method(&self) -> &'static str {
        self.strategy.method()
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
        if model_override.is_some() {
            warn!("Model override is ignored by the link backend; linked files are not rewritten");
        }
        if !dry_run {
            file_ops::ensure_base_dirs(&self.target)?;
        }

        match self.strategy {
            LinkStrategy::Stow => self.run_stow(package, false, dry_run),
            LinkStrategy::Symlink => Ok(self.link_files(&package_dir, dry_run)),
        }
    }

    fn uninstall_package(&self, package: &str, dry_run: bool) -> Result<InstallOutcome> {
        let package_dir = self.registry.join(package);
        if !package_dir.is_dir() {
            warn!("Package directory not found: {}", package_dir.display());
            let mut outcome = InstallOutcome::default();
            outcome
                .warnings
                .push(format!("Package directory not found: {}", package_dir.display()));
            return Ok(outcome);
        }

        match self.strategy {
            LinkStrategy::Stow => self.run_stow(package, true, dry_run),
            LinkStrategy::Symlink => Ok(self.unlink_files(&package_dir, dry_run)),
        }
    }

    fn detect_installed_components(&self) -> DetectedComponents {
        detection::scan_with(&self.target, |manifest| {
            detection::is_link_managed(&self.target, manifest)
        })
    }
}
