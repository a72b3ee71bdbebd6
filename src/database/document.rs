//! Serialized shape of the installed database (`opencode-registry-installed.json`)

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::ComponentKind;

/// Schema version written into new documents
pub const SCHEMA_VERSION: &str = "1.0";

/// Registry format version recorded in metadata
pub const REGISTRY_VERSION: &str = "0.1.0";

/// Install method of a document nothing has been installed into yet
pub const UNKNOWN_METHOD: &str = "unknown";

/// Current UTC time as an ISO-8601 timestamp with a `Z` suffix
pub fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// The whole persisted inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseDocument {
    /// Schema version of this document
    pub version: String,
    pub last_updated: String,
    pub install_method: String,
    pub target_directory: Option<String>,
    pub registry: RegistrySource,
    pub installed: InstalledBuckets,
    pub bundles: BTreeMap<String, BundleRecord>,
    pub logs: Logs,
    pub metadata: Metadata,
}

impl Default for DatabaseDocument {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            last_updated: timestamp(),
            install_method: UNKNOWN_METHOD.to_string(),
            target_directory: None,
            registry: RegistrySource::default(),
            installed: InstalledBuckets::default(),
            bundles: BTreeMap::new(),
            logs: Logs::default(),
            metadata: Metadata::default(),
        }
    }
}

/// Where installed content came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistrySource {
    pub source: String,
    pub path: Option<String>,
}

impl Default for RegistrySource {
    fn default() -> Self {
        Self {
            source: "local".to_string(),
            path: None,
        }
    }
}

/// Installed records grouped by kind; all four buckets always serialize
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InstalledBuckets {
    pub agents: BTreeMap<String, InstalledRecord>,
    pub subagents: BTreeMap<String, InstalledRecord>,
    pub skills: BTreeMap<String, InstalledRecord>,
    pub commands: BTreeMap<String, InstalledRecord>,
}

impl InstalledBuckets {
    pub fn bucket(&self, kind: ComponentKind) -> &BTreeMap<String, InstalledRecord> {
        match kind {
            ComponentKind::Agent => &self.agents,
            ComponentKind::Subagent => &self.subagents,
            ComponentKind::Skill => &self.skills,
            ComponentKind::Command => &self.commands,
        }
    }

    pub fn bucket_mut(&mut self, kind: ComponentKind) -> &mut BTreeMap<String, InstalledRecord> {
        match kind {
            ComponentKind::Agent => &mut self.agents,
            ComponentKind::Subagent => &mut self.subagents,
            ComponentKind::Skill => &mut self.skills,
            ComponentKind::Command => &mut self.commands,
        }
    }

    /// All records in kind order, then id order
    pub fn records(&self) -> impl Iterator<Item = &InstalledRecord> {
        ComponentKind::ALL
            .into_iter()
            .flat_map(move |kind| self.bucket(kind).values())
    }

    /// First record with this id, searching kinds in order
    pub fn find(&self, id: &str) -> Option<&InstalledRecord> {
        ComponentKind::ALL
            .into_iter()
            .find_map(|kind| self.bucket(kind).get(id))
    }

    pub fn len(&self) -> usize {
        ComponentKind::ALL
            .iter()
            .map(|kind| self.bucket(*kind).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One installed component
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstalledRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub install_method: String,
    #[serde(default)]
    pub installed_at: String,
}

/// A bundle installed as a unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BundleRecord {
    pub name: String,
    #[serde(default)]
    pub installed_at: String,
    #[serde(default)]
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Logs {
    pub installation: Vec<LogEntry>,
}

/// One entry of the append-only action log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub action: String,
    pub components: Vec<String>,
    pub method: String,
    pub status: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub os_type: String,
    pub tool_version: String,
    pub registry_version: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            os_type: std::env::consts::OS.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            registry_version: REGISTRY_VERSION.to_string(),
        }
    }
}
