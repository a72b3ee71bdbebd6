//! Component manifest domain type

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{ComponentKind, ModelTier};

/// Version assumed when a component declares none
pub const DEFAULT_VERSION: &str = "1.0.0";

/// A source file of a component and where it lands in the target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapping {
    pub path: String,
    pub dest: String,
}

/// Metadata of a component, rebuilt every time its file is inspected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentManifest {
    pub id: String,
    pub kind: ComponentKind,
    pub name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: BTreeSet<String>,
    pub dependencies: Vec<String>,
    pub sources: Vec<SourceMapping>,
    pub model_tier: Option<ModelTier>,
    pub model: Option<String>,
}

impl ComponentManifest {
    /// Manifest derived purely from the file name, used when a file has no frontmatter
    pub fn from_file_name(id: &str, kind: ComponentKind, file_name: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            name: title_case(id),
            description: format!("OpenCode {kind}"),
            version: DEFAULT_VERSION.to_string(),
            author: String::new(),
            tags: BTreeSet::new(),
            dependencies: Vec::new(),
            sources: vec![SourceMapping::for_file(kind, file_name)],
            model_tier: None,
            model: None,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl SourceMapping {
    pub fn for_file(kind: ComponentKind, file_name: &str) -> Self {
        Self {
            path: file_name.to_string(),
            dest: format!("{}/{}", kind.plural(), file_name),
        }
    }
}

/// `build-general` -> `Build General`
pub fn title_case(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
