//! Bundle definitions (`<registry>/bundles/<name>.yaml`)
//!
//! A bundle is a curated, named list of component ids. The installer only
//! reads these files; it never writes them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result, read_failed};

/// Bundle definition file extension
pub const BUNDLE_EXTENSION: &str = "yaml";

/// A named list of components installed and removed together
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BundleDefinition {
    /// Display name; defaults to the file stem when absent
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Component ids in declaration order
    #[serde(default)]
    pub components: Vec<String>,
}

impl BundleDefinition {
    /// Parse a bundle definition from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let bundle: Self = serde_yaml::from_str(yaml)?;
        Ok(bundle)
    }

    /// Load `<bundles_dir>/<name>.yaml`
    pub fn load(bundles_dir: &Path, name: &str) -> Result<Self> {
        let path = bundles_dir.join(format!("{name}.{BUNDLE_EXTENSION}"));
        if !path.is_file() {
            return Err(RegistryError::BundleNotFound {
                name: name.to_string(),
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| read_failed(&path, &e))?;
        let mut bundle: Self =
            serde_yaml::from_str(&content).map_err(|e| RegistryError::ConfigParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if bundle.name.is_empty() {
            bundle.name = name.to_string();
        }
        Ok(bundle)
    }
}
