//! Persisted tool configuration
//!
//! The configuration document is a JSON object stored at
//! `~/.opencode-registry/config.json`. Loading merges the stored values over
//! the defaults, so unknown keys written by other versions survive a
//! round trip and newly introduced keys always have a value.
//!
//! Every `set*` call writes the whole document back immediately. There is no
//! file locking: two processes writing concurrently lose updates, last writer
//! wins.

pub mod bundle;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::ModelTier;
use crate::error::{RegistryError, Result, read_failed, write_failed};
use crate::registry::Registry;

pub use bundle::BundleDefinition;

/// Environment variable overriding the configuration file location
pub const CONFIG_FILE_ENV: &str = "OPENCODE_CONFIG_FILE";

/// Default target directory, relative to the home directory
pub const DEFAULT_TARGET: &str = "~/.config/opencode";

/// How many parent directories registry auto-detection inspects
pub const REGISTRY_SEARCH_DEPTH: usize = 5;

const KEY_TARGET: &str = "target";
const KEY_REGISTRY_PATH: &str = "registry_path";
const KEY_INSTALL_METHOD: &str = "install_method";
const KEY_LOG_LEVEL: &str = "log_level";
const KEY_MODEL_TIERS: &str = "model_tiers";

/// Which installation backend the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendChoice {
    /// Let the tool decide (content copy)
    #[default]
    Auto,
    Copy,
    Link,
}

impl BackendChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            BackendChoice::Auto => "auto",
            BackendChoice::Copy => "copy",
            BackendChoice::Link => "link",
        }
    }
}

impl fmt::Display for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendChoice {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(BackendChoice::Auto),
            "copy" => Ok(BackendChoice::Copy),
            // "stow" and "symlink" are the methods recorded by the link backend
            "link" | "stow" | "symlink" => Ok(BackendChoice::Link),
            other => Err(RegistryError::ConfigInvalid {
                message: format!("unknown install method '{other}' (expected auto, copy or link)"),
            }),
        }
    }
}

/// Default location of the configuration document
pub fn default_config_path() -> PathBuf {
    home_dir().join(".opencode-registry").join("config.json")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

/// Look for a registry root at `start` or one of its parents.
///
/// A registry root is a directory containing both the component package and
/// the bundle definitions.
pub fn detect_registry_path(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .take(REGISTRY_SEARCH_DEPTH + 1)
        .find(|dir| Registry::is_registry(dir))
        .map(Path::to_path_buf)
}

fn defaults() -> Map<String, Value> {
    let tiers: Map<String, Value> = ModelTier::ALL
        .iter()
        .map(|tier| (tier.as_str().to_string(), Value::Null))
        .collect();

    let mut map = Map::new();
    map.insert(KEY_TARGET.to_string(), json!(DEFAULT_TARGET));
    map.insert(KEY_REGISTRY_PATH.to_string(), Value::Null);
    map.insert(
        KEY_INSTALL_METHOD.to_string(),
        json!(BackendChoice::Auto.as_str()),
    );
    map.insert(KEY_LOG_LEVEL.to_string(), json!("info"));
    map.insert(KEY_MODEL_TIERS.to_string(), Value::Object(tiers));
    map
}

/// Merge stored values over the defaults.
///
/// Top-level keys are replaced wholesale except `model_tiers`, which is merged
/// one level deeper so every tier key exists.
fn merge_over_defaults(stored: Map<String, Value>) -> Map<String, Value> {
    let mut merged = defaults();
    for (key, value) in stored {
        match (key.as_str(), value) {
            (KEY_MODEL_TIERS, Value::Object(tiers)) => {
                if let Some(Value::Object(base)) = merged.get_mut(KEY_MODEL_TIERS) {
                    base.extend(tiers);
                }
            }
            (KEY_MODEL_TIERS, _) => {}
            (_, value) => {
                merged.insert(key, value);
            }
        }
    }
    merged
}

/// Tool configuration backed by a JSON document
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: Map<String, Value>,
}

impl Config {
    /// Load the document at `path`, or start from defaults when it does not exist.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self {
                path,
                data: defaults(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| read_failed(&path, &e))?;
        let stored: Value =
            serde_json::from_str(&content).map_err(|e| RegistryError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let Value::Object(stored) = stored else {
            return Err(RegistryError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        Ok(Self {
            path,
            data: merge_over_defaults(stored),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole document back to disk
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_failed(parent, &e))?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(self.data.clone()))?;
        fs::write(&self.path, content + "\n").map_err(|e| write_failed(&self.path, &e))
    }

    /// Raw value of a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    /// String value of a top-level key, or `default` when unset or not a string
    pub fn get_str_or(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Set a top-level key and persist
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.data.insert(key.to_string(), value.into());
        self.save()
    }

    /// Every key/value pair in document order
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    // Typed accessors

    /// Target directory with `~` expanded
    pub fn target_dir(&self) -> PathBuf {
        expand_home(&self.get_str_or(KEY_TARGET, DEFAULT_TARGET))
    }

    pub fn set_target(&mut self, target: &Path) -> Result<()> {
        self.set(KEY_TARGET, target.display().to_string())
    }

    /// Explicitly configured registry path
    pub fn registry_path(&self) -> Option<PathBuf> {
        self.get(KEY_REGISTRY_PATH)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(expand_home)
    }

    pub fn set_registry_path(&mut self, path: Option<&Path>) -> Result<()> {
        let value = path.map_or(Value::Null, |p| json!(p.display().to_string()));
        self.set(KEY_REGISTRY_PATH, value)
    }

    /// Configured registry path, else one detected from `cwd`
    pub fn resolve_registry(&self, cwd: &Path) -> Result<PathBuf> {
        if let Some(path) = self.registry_path() {
            return Ok(path);
        }
        let detected = detect_registry_path(cwd).ok_or(RegistryError::RegistryNotFound)?;
        debug!("Auto-detected registry at {}", detected.display());
        Ok(detected)
    }

    pub fn backend_choice(&self) -> Result<BackendChoice> {
        self.get_str_or(KEY_INSTALL_METHOD, BackendChoice::Auto.as_str())
            .parse()
    }

    pub fn set_backend_choice(&mut self, choice: BackendChoice) -> Result<()> {
        self.set(KEY_INSTALL_METHOD, choice.as_str())
    }

    pub fn log_level(&self) -> String {
        self.get_str_or(KEY_LOG_LEVEL, "info")
    }

    // Model tiers

    fn tiers(&self) -> Option<&Map<String, Value>> {
        self.data.get(KEY_MODEL_TIERS).and_then(Value::as_object)
    }

    fn tiers_mut(&mut self) -> &mut Map<String, Value> {
        let entry = self
            .data
            .entry(KEY_MODEL_TIERS.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("model_tiers was just normalised to an object"),
        }
    }

    /// Model configured for a tier; empty strings count as unset
    pub fn get_model_for_tier(&self, tier: ModelTier) -> Option<String> {
        self.tiers()?
            .get(tier.as_str())
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }

    /// Set (or clear with `None`) the model of a tier and persist
    pub fn set_model_tier(&mut self, tier: ModelTier, model: Option<&str>) -> Result<()> {
        let value = model.map_or(Value::Null, |m| json!(m));
        self.tiers_mut().insert(tier.as_str().to_string(), value);
        self.save()
    }

    /// Every tier with its model, in tier order
    pub fn list_model_tiers(&self) -> Vec<(ModelTier, Option<String>)> {
        ModelTier::ALL
            .into_iter()
            .map(|tier| (tier, self.get_model_for_tier(tier)))
            .collect()
    }

    /// Tiers without a configured model
    pub fn missing_tiers(&self) -> Vec<ModelTier> {
        ModelTier::ALL
            .into_iter()
            .filter(|tier| self.get_model_for_tier(*tier).is_none())
            .collect()
    }

    /// Clear every tier and persist
    pub fn reset_model_tiers(&mut self) -> Result<()> {
        let tiers = self.tiers_mut();
        for tier in ModelTier::ALL {
            tiers.insert(tier.as_str().to_string(), Value::Null);
        }
        self.save()
    }
}
