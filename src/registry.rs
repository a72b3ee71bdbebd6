//! Registry layout and component lookup
//!
//! A registry root holds the installable package (`opencode/`) and bundle
//! definitions (`bundles/*.yaml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::BundleDefinition;
use crate::config::bundle::BUNDLE_EXTENSION;
use crate::domain::{ComponentKind, ComponentManifest, DetectedComponents};
use crate::error::Result;
use crate::installer::detection;
use crate::manifest::ManifestParser;

/// Name of the package directory below the registry root
pub const PACKAGE_NAME: &str = "opencode";

/// Name of the bundle directory below the registry root
pub const BUNDLES_DIR: &str = "bundles";

/// A local component registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// True when `dir` looks like a registry root
    pub fn is_registry(dir: &Path) -> bool {
        dir.join(PACKAGE_NAME).is_dir() && dir.join(BUNDLES_DIR).is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root.join(PACKAGE_NAME)
    }

    pub fn bundles_dir(&self) -> PathBuf {
        self.root.join(BUNDLES_DIR)
    }

    /// Manifest file of a component, if the package has it
    pub fn find_component(&self, kind: ComponentKind, id: &str) -> Option<PathBuf> {
        detection::find_manifest(&self.package_dir(), kind, id)
    }

    /// Search every kind, in lookup order, for a component id
    pub fn find_any(&self, id: &str) -> Option<(ComponentKind, PathBuf)> {
        ComponentKind::ALL
            .into_iter()
            .find_map(|kind| self.find_component(kind, id).map(|path| (kind, path)))
    }

    /// Parsed manifest of a component
    pub fn load_component(&self, kind: ComponentKind, id: &str) -> Option<Result<ComponentManifest>> {
        self.find_component(kind, id)
            .map(|path| ManifestParser::create_from_md(&path, kind))
    }

    /// Version the registry currently offers for a component.
    ///
    /// `None` when the component is absent or its manifest cannot be read.
    pub fn available_version(&self, kind: ComponentKind, id: &str) -> Option<String> {
        match self.load_component(kind, id)? {
            Ok(manifest) => Some(manifest.version),
            Err(e) => {
                debug!("Could not read {kind} '{id}': {e}");
                None
            }
        }
    }

    /// Registry versions for every detected component that the registry has
    pub fn collect_versions(&self, detected: &DetectedComponents) -> HashMap<String, String> {
        detected
            .iter()
            .filter_map(|(kind, id)| {
                self.available_version(kind, id)
                    .map(|version| (id.to_string(), version))
            })
            .collect()
    }

    /// Ids of every component the package offers
    pub fn component_ids(&self) -> DetectedComponents {
        detection::scan(&self.package_dir())
    }

    /// Every component manifest in the package, in kind then id order.
    ///
    /// Unreadable manifests are skipped.
    pub fn list_components(&self) -> Vec<ComponentManifest> {
        ComponentKind::ALL
            .into_iter()
            .flat_map(|kind| detection::manifests(&self.package_dir(), kind).into_iter().map(move |path| (kind, path)))
            .filter_map(|(kind, path)| match ManifestParser::create_from_md(&path, kind) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    debug!("Skipping {}: {e}", path.display());
                    None
                }
            })
            .collect()
    }

    /// Load `bundles/<name>.yaml`
    pub fn load_bundle(&self, name: &str) -> Result<BundleDefinition> {
        BundleDefinition::load(&self.bundles_dir(), name)
    }

    /// Names of all bundle definitions, sorted
    pub fn bundle_names(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.bundles_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == BUNDLE_EXTENSION))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }
}
