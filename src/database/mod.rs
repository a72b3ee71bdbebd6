//! Installed component database
//!
//! Tracks what has been installed into the target directory, which bundles
//! were requested and a log of every install, update and uninstall.
//!
//! The database is read fully on load and written fully by every mutating
//! call. Like the configuration it does no locking.

pub mod document;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::{ComponentKind, DEFAULT_VERSION, DetectedComponents};
use crate::error::{RegistryError, Result, read_failed, write_failed};

pub use document::{
    BundleRecord, DatabaseDocument, InstalledBuckets, InstalledRecord, LogEntry, timestamp,
};

/// Environment variable overriding the database location
pub const DATABASE_FILE_ENV: &str = "OPENCODE_REGISTRY_DB";

/// Version reported for a tracked component whose record has no version
pub const UNKNOWN_VERSION: &str = "unknown";

/// Default location of the database document
pub fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("opencode")
        .join("opencode-registry-installed.json")
}

/// Persisted inventory of installed components
#[derive(Debug, Clone)]
pub struct InstalledDatabase {
    path: PathBuf,
    data: DatabaseDocument,
}

impl InstalledDatabase {
    /// Load the database at `path`, or start an empty one when it does not exist.
    ///
    /// Nothing is written until the first mutation.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No installed database at {}, starting empty", path.display());
            return Ok(Self {
                path,
                data: DatabaseDocument::default(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| read_failed(&path, &e))?;
        let data = serde_json::from_str(&content).map_err(|e| RegistryError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &DatabaseDocument {
        &self.data
    }

    /// Stamp `lastUpdated` and write the document
    pub fn save(&mut self) -> Result<()> {
        self.data.last_updated = timestamp();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_failed(parent, &e))?;
        }
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content + "\n").map_err(|e| write_failed(&self.path, &e))
    }

    // Mutations

    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        id: &str,
        version: Option<&str>,
        install_method: &str,
    ) -> Result<()> {
        let record = InstalledRecord {
            id: id.to_string(),
            kind,
            version: version.map(str::to_string),
            install_method: install_method.to_string(),
            installed_at: timestamp(),
        };
        self.data
            .installed
            .bucket_mut(kind)
            .insert(id.to_string(), record);
        self.save()
    }

    /// Remove a component record; returns whether one existed
    pub fn remove_component(&mut self, kind: ComponentKind, id: &str) -> Result<bool> {
        let removed = self.data.installed.bucket_mut(kind).remove(id).is_some();
        self.save()?;
        Ok(removed)
    }

    pub fn set_install_method(&mut self, method: &str) -> Result<()> {
        self.data.install_method = method.to_string();
        self.save()
    }

    pub fn set_target_directory(&mut self, target: &Path) -> Result<()> {
        self.data.target_directory = Some(target.display().to_string());
        self.save()
    }

    pub fn set_registry_path(&mut self, registry: &Path) -> Result<()> {
        self.data.registry.path = Some(registry.display().to_string());
        self.save()
    }

    pub fn add_bundle(&mut self, name: &str, components: &[String]) -> Result<()> {
        let record = BundleRecord {
            name: name.to_string(),
            installed_at: timestamp(),
            components: components.to_vec(),
        };
        self.data.bundles.insert(name.to_string(), record);
        self.save()
    }

    /// Remove a bundle record; returns whether one existed
    pub fn remove_bundle(&mut self, name: &str) -> Result<bool> {
        let removed = self.data.bundles.remove(name).is_some();
        self.save()?;
        Ok(removed)
    }

    /// Forget every installed component and bundle
    pub fn clear_installed(&mut self) -> Result<()> {
        self.data.installed = InstalledBuckets::default();
        self.data.bundles.clear();
        self.save()
    }

    /// Append an entry to the installation log
    pub fn log_action(
        &mut self,
        action: &str,
        components: &[String],
        method: &str,
        status: &str,
    ) -> Result<()> {
        self.data.logs.installation.push(LogEntry {
            timestamp: timestamp(),
            action: action.to_string(),
            components: components.to_vec(),
            method: method.to_string(),
            status: status.to_string(),
            duration: "0s".to_string(),
        });
        self.save()
    }

    /// Replace the whole installed map with records for `detected`.
    ///
    /// Components missing from `detected` disappear from the database.
    /// Versions come from `versions` keyed by id, defaulting to `1.0.0`.
    pub fn sync_from_detected(
        &mut self,
        detected: &DetectedComponents,
        install_method: &str,
        versions: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let mut installed = InstalledBuckets::default();
        for (kind, id) in detected.iter() {
            let version = versions
                .and_then(|v| v.get(id))
                .map_or(DEFAULT_VERSION, String::as_str);
            installed.bucket_mut(kind).insert(
                id.to_string(),
                InstalledRecord {
                    id: id.to_string(),
                    kind,
                    version: Some(version.to_string()),
                    install_method: install_method.to_string(),
                    installed_at: timestamp(),
                },
            );
        }

        debug!("Synced {} installed components", installed.len());
        self.data.installed = installed;
        self.save()
    }

    // Queries

    pub fn is_installed(&self, id: &str) -> bool {
        self.data.installed.find(id).is_some()
    }

    /// Installed version of `id`: `None` when not tracked, `"unknown"` when the
    /// record has no version
    pub fn get_installed_version(&self, id: &str) -> Option<String> {
        self.data.installed.find(id).map(|record| {
            record
                .version
                .clone()
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
        })
    }

    /// Every installed record, in kind order
    pub fn get_all_installed(&self) -> Vec<&InstalledRecord> {
        self.data.installed.records().collect()
    }

    /// Ids of installed components grouped by kind
    pub fn installed_ids(&self) -> DetectedComponents {
        let mut ids = DetectedComponents::new();
        for kind in ComponentKind::ALL {
            ids.set(kind, self.data.installed.bucket(kind).keys().cloned().collect());
        }
        ids
    }

    pub fn install_method(&self) -> &str {
        &self.data.install_method
    }

    pub fn target_directory(&self) -> Option<&str> {
        self.data.target_directory.as_deref()
    }

    pub fn registry_path(&self) -> Option<&str> {
        self.data.registry.path.as_deref()
    }

    pub fn last_updated(&self) -> &str {
        &self.data.last_updated
    }

    pub fn bundles(&self) -> impl Iterator<Item = &BundleRecord> {
        self.data.bundles.values()
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.data.logs.installation
    }
}
