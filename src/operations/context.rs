//! Services shared by every operation
//!
//! The configuration and the installed database are opened once per
//! invocation and handed to operations explicitly.

use std::path::{Path, PathBuf};

use crate::config::{self, BackendChoice, Config};
use crate::database::{self, InstalledDatabase};
use crate::error::{RegistryError, Result};
use crate::installer::{self, InstallBackend};
use crate::registry::Registry;

/// Opened configuration and database, plus the directory the tool runs in
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub database: InstalledDatabase,
    /// Starting point for registry auto-detection
    pub cwd: PathBuf,
}

impl Context {
    pub fn new(config: Config, database: InstalledDatabase, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            database,
            cwd: cwd.into(),
        }
    }

    /// Open both documents, falling back to their default locations
    pub fn open(config_path: Option<&Path>, database_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path.map_or_else(config::default_config_path, Path::to_path_buf);
        let database_path =
            database_path.map_or_else(database::default_database_path, Path::to_path_buf);
        let cwd = std::env::current_dir().map_err(|e| RegistryError::IoError {
            message: format!("Failed to get current directory: {e}"),
        })?;

        Ok(Self::new(
            Config::load(config_path)?,
            InstalledDatabase::load(database_path)?,
            cwd,
        ))
    }

    /// Registry from configuration, or auto-detected from `cwd`
    pub fn registry(&self) -> Result<Registry> {
        self.config.resolve_registry(&self.cwd).map(Registry::new)
    }

    /// Target directory: explicit override, else configuration
    pub fn target_dir(&self, target: Option<&Path>) -> PathBuf {
        match target {
            Some(path) => config::expand_home(&path.to_string_lossy()),
            None => self.config.target_dir(),
        }
    }

    /// Target recorded by the last install, else the configured one
    pub fn installed_target_dir(&self) -> PathBuf {
        self.database
            .target_directory()
            .map_or_else(|| self.config.target_dir(), PathBuf::from)
    }

    /// Backend matching the last install's method, else the configured choice
    pub fn installed_backend_choice(&self) -> Result<BackendChoice> {
        match self.database.install_method().parse() {
            Ok(choice) => Ok(choice),
            Err(_) => self.config.backend_choice(),
        }
    }
}

/// Build a backend borrowing only the configuration, so the database stays
/// mutably usable next to it
pub fn backend<'a>(
    config: &'a Config,
    choice: BackendChoice,
    registry: &Registry,
    target: &Path,
) -> Box<dyn InstallBackend + 'a> {
    installer::select(choice, registry.root(), target, config)
}
