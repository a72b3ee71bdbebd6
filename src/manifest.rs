//! Component manifest parsing and validation
//!
//! A component's metadata lives in the YAML frontmatter of its markdown file.
//! Files without frontmatter still yield a manifest derived from the file name.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::domain::{ComponentKind, ComponentManifest, DEFAULT_VERSION, SourceMapping};
use crate::domain::manifest::title_case;
use crate::error::{Result, read_failed};
use crate::frontmatter;

/// Frontmatter fields as declared, before any defaulting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawManifest {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl RawManifest {
    /// Collect declared fields from frontmatter; `id` comes from the file location.
    pub fn from_frontmatter(id: &str, frontmatter: &Value) -> Self {
        Self {
            id: Some(id.to_string()).filter(|s| !s.is_empty()),
            kind: frontmatter::get_str(frontmatter, "type"),
            name: frontmatter::get_str(frontmatter, "name"),
            description: frontmatter::get_str(frontmatter, "description"),
        }
    }
}

impl From<&ComponentManifest> for RawManifest {
    fn from(manifest: &ComponentManifest) -> Self {
        Self {
            id: Some(manifest.id.clone()),
            kind: Some(manifest.kind.to_string()),
            name: Some(manifest.name.clone()),
            description: Some(manifest.description.clone()),
        }
    }
}

/// Parse and validate component manifests
pub struct ManifestParser;

impl ManifestParser {
    /// Read the frontmatter of a markdown file.
    ///
    /// Returns `Ok(None)` when the file has no frontmatter block.
    pub fn parse_frontmatter(md_file: &Path) -> Result<Option<Value>> {
        let content = fs::read_to_string(md_file).map_err(|e| read_failed(md_file, &e))?;
        Ok(Self::parse_frontmatter_str(&content))
    }

    /// Frontmatter of in-memory content; an empty block counts as absent.
    pub fn parse_frontmatter_str(content: &str) -> Option<Value> {
        let (value, _) = frontmatter::parse_frontmatter_and_body(content)?;
        match &value {
            Value::Mapping(m) if !m.is_empty() => Some(value),
            _ => None,
        }
    }

    /// Version of a component: skills keep it under `metadata.version`, every
    /// other kind at the top level.
    pub fn extract_version(frontmatter: &Value, kind: ComponentKind) -> String {
        let version = match kind {
            ComponentKind::Skill => frontmatter::get_nested_str(frontmatter, &["metadata", "version"]),
            ComponentKind::Agent | ComponentKind::Subagent | ComponentKind::Command => {
                frontmatter::get_str(frontmatter, "version")
            }
        };
        version.unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Build a manifest from a markdown file of the given kind
    pub fn create_from_md(md_file: &Path, kind: ComponentKind) -> Result<ComponentManifest> {
        let frontmatter = Self::parse_frontmatter(md_file)?;
        Ok(Self::manifest_from(md_file, kind, frontmatter.as_ref()))
    }

    /// Build a manifest from already-read frontmatter
    pub fn manifest_from(
        md_file: &Path,
        kind: ComponentKind,
        frontmatter: Option<&Value>,
    ) -> ComponentManifest {
        let id = kind.id_from_path(md_file);
        let file_name = md_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(fm) = frontmatter else {
            return ComponentManifest::from_file_name(&id, kind, &file_name);
        };

        ComponentManifest {
            name: frontmatter::get_str(fm, "name").unwrap_or_else(|| title_case(&id)),
            description: frontmatter::get_str(fm, "description").unwrap_or_default(),
            version: Self::extract_version(fm, kind),
            author: frontmatter::get_str(fm, "author").unwrap_or_default(),
            tags: frontmatter::get_str_list(fm, "tags").into_iter().collect(),
            dependencies: frontmatter::get_str_list(fm, "dependencies"),
            sources: vec![SourceMapping::for_file(kind, &file_name)],
            model_tier: frontmatter::get_str(fm, "model_tier").and_then(|t| t.parse().ok()),
            model: frontmatter::get_str(fm, "model"),
            id,
            kind,
        }
    }

    /// Validate declared manifest fields, returning human-readable errors.
    ///
    /// Never fails; the caller decides whether errors block or warn.
    pub fn validate(manifest: &RawManifest) -> Vec<String> {
        let mut errors = Vec::new();
        let is_blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());

        if is_blank(&manifest.id) {
            errors.push("Missing required field: id".to_string());
        }
        if is_blank(&manifest.kind) {
            errors.push("Missing required field: type".to_string());
        }
        let kind = manifest.kind.as_deref().unwrap_or_default();
        if !ComponentKind::ALL.iter().any(|k| k.as_str() == kind) {
            errors.push(format!(
                "Invalid type: {kind}. Must be agent, subagent, skill, or command"
            ));
        }
        if is_blank(&manifest.name) {
            errors.push("Missing required field: name".to_string());
        }
        if is_blank(&manifest.description) {
            errors.push("Missing required field: description".to_string());
        }

        errors
    }
}
