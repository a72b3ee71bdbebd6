//! Component kinds and their on-disk layout
//!
//! Every kind carries its own path-resolution rules as data: where its
//! manifest file lives relative to the package root and how its id is
//! derived from that path.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// File name that marks a directory as a skill
pub const SKILL_MANIFEST: &str = "SKILL.md";

/// Extension of component manifest files
pub const MARKDOWN_EXTENSION: &str = "md";

/// How the manifests of a kind are arranged below its base directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `<base>/<id>.md`
    File,
    /// `<base>/<category>/<id>.md`
    Categorized,
    /// `<base>/<id>/<manifest>`
    Directory { manifest: &'static str },
}

/// Layout of a component kind relative to a package (or target) root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Path segments of the base directory
    pub base: &'static [&'static str],
    pub shape: Shape,
}

impl Layout {
    /// Base directory of this kind under `root`
    pub fn base_dir(&self, root: &Path) -> PathBuf {
        self.base.iter().fold(root.to_path_buf(), |p, s| p.join(s))
    }

    /// Manifest path of `id` under `root`, when it can be derived without searching
    pub fn direct_manifest_path(&self, root: &Path, id: &str) -> Option<PathBuf> {
        let base = self.base_dir(root);
        match self.shape {
            Shape::File => Some(base.join(format!("{id}.{MARKDOWN_EXTENSION}"))),
            Shape::Directory { manifest } => Some(base.join(id).join(manifest)),
            Shape::Categorized => None,
        }
    }
}

/// The four kinds of installable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Agent,
    Subagent,
    Skill,
    Command,
}

impl ComponentKind {
    /// All kinds in lookup order
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Agent,
        ComponentKind::Subagent,
        ComponentKind::Skill,
        ComponentKind::Command,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Agent => "agent",
            ComponentKind::Subagent => "subagent",
            ComponentKind::Skill => "skill",
            ComponentKind::Command => "command",
        }
    }

    /// Plural bucket name used by the installed database and detection results
    pub fn plural(self) -> &'static str {
        match self {
            ComponentKind::Agent => "agents",
            ComponentKind::Subagent => "subagents",
            ComponentKind::Skill => "skills",
            ComponentKind::Command => "commands",
        }
    }

    pub fn from_plural(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.plural() == value)
    }

    pub fn layout(self) -> Layout {
        match self {
            ComponentKind::Agent => Layout {
                base: &["agents"],
                shape: Shape::File,
            },
            ComponentKind::Subagent => Layout {
                base: &["agents", "subagents"],
                shape: Shape::Categorized,
            },
            ComponentKind::Skill => Layout {
                base: &["skills"],
                shape: Shape::Directory {
                    manifest: SKILL_MANIFEST,
                },
            },
            ComponentKind::Command => Layout {
                base: &["commands"],
                shape: Shape::File,
            },
        }
    }

    /// Derive the component id from its manifest path.
    ///
    /// Skills are stored as `<id>/SKILL.md`, so their id is the parent directory name;
    /// every other kind uses the file stem.
    pub fn id_from_path(self, manifest: &Path) -> String {
        let name = match self.layout().shape {
            Shape::Directory { .. } => manifest.parent().and_then(Path::file_name),
            Shape::File | Shape::Categorized => manifest.file_stem(),
        };
        name.map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == lowered || k.plural() == lowered)
            .ok_or_else(|| RegistryError::InvalidComponentType {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_round_trip() {
        for kind in ComponentKind::ALL {
            assert_eq!(ComponentKind::from_plural(kind.plural()), Some(kind));
        }
        assert_eq!(ComponentKind::from_plural("rules"), None);
    }

    #[test]
    fn test_from_str_accepts_singular_and_plural() {
        assert_eq!(
            "Skill".parse::<ComponentKind>().ok(),
            Some(ComponentKind::Skill)
        );
        assert_eq!(
            "commands".parse::<ComponentKind>().ok(),
            Some(ComponentKind::Command)
        );
        assert!("rule".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_skill_id_is_parent_directory() {
        let path = Path::new("/reg/opencode/skills/mcp-builder/SKILL.md");
        assert_eq!(ComponentKind::Skill.id_from_path(path), "mcp-builder");
    }

    #[test]
    fn test_file_id_is_stem() {
        let path = Path::new("/reg/opencode/agents/subagents/infra/terraform-expert.md");
        assert_eq!(
            ComponentKind::Subagent.id_from_path(path),
            "terraform-expert"
        );
        let path = Path::new("/reg/opencode/commands/commit.md");
        assert_eq!(ComponentKind::Command.id_from_path(path), "commit");
    }

    #[test]
    fn test_direct_manifest_paths() {
        let root = Path::new("/pkg");
        assert_eq!(
            ComponentKind::Agent
                .layout()
                .direct_manifest_path(root, "build"),
            Some(PathBuf::from("/pkg/agents/build.md"))
        );
        assert_eq!(
            ComponentKind::Skill
                .layout()
                .direct_manifest_path(root, "pdf"),
            Some(PathBuf::from("/pkg/skills/pdf/SKILL.md"))
        );
        assert_eq!(
            ComponentKind::Subagent
                .layout()
                .direct_manifest_path(root, "x"),
            None
        );
    }

    #[test]
    fn test_serde_uses_lowercase_singular() {
        let json = serde_json::to_string(&ComponentKind::Subagent).unwrap();
        assert_eq!(json, "\"subagent\"");
    }
}
