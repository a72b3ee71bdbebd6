//! Structural detection of installed components
//!
//! Detection reads only the shape of a directory tree, never file content:
//! - `agents/*.md` are primary agents
//! - `agents/subagents/<category>/*.md` are subagents
//! - `skills/<id>/` directories holding a `SKILL.md` are skills
//! - `commands/*.md` are commands
//!
//! Names starting with `.` or `_` are ignored at every level. The same scan
//! runs over a registry package to enumerate what it offers.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::component::MARKDOWN_EXTENSION;
use crate::domain::{ComponentKind, DetectedComponents, Shape};

use super::file_ops::is_symlink;

/// True for names detection never treats as components
pub fn is_ignored_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Immediate children of `dir`, sorted, with ignored names removed.
///
/// Symbolic links are followed so linked files and folded directories count.
fn children(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !is_ignored_name(&entry.file_name().to_string_lossy()))
        .map(walkdir::DirEntry::into_path)
}

fn is_markdown_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

/// Manifest paths of every component of `kind` under `root`
pub fn manifests(root: &Path, kind: ComponentKind) -> Vec<PathBuf> {
    let layout = kind.layout();
    let base = layout.base_dir(root);
    if !base.is_dir() {
        return Vec::new();
    }

    match layout.shape {
        Shape::File => children(&base).filter(|p| is_markdown_file(p)).collect(),
        Shape::Categorized => children(&base)
            .filter(|category| category.is_dir())
            .flat_map(|category| children(&category).filter(|p| is_markdown_file(p)).collect::<Vec<_>>())
            .collect(),
        Shape::Directory { manifest } => children(&base)
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.join(manifest))
            .filter(|manifest| manifest.is_file())
            .collect(),
    }
}

/// Manifest path of one component under `root`, if present
pub fn find_manifest(root: &Path, kind: ComponentKind, id: &str) -> Option<PathBuf> {
    let layout = kind.layout();
    match layout.shape {
        Shape::File | Shape::Directory { .. } => layout
            .direct_manifest_path(root, id)
            .filter(|path| path.is_file()),
        Shape::Categorized => manifests(root, kind)
            .into_iter()
            .find(|path| kind.id_from_path(path) == id),
    }
}

/// Detect components under `root`, keeping only manifests accepted by `accept`
pub fn scan_with(root: &Path, accept: impl Fn(&Path) -> bool) -> DetectedComponents {
    let mut detected = DetectedComponents::new();
    if !root.is_dir() {
        return detected;
    }

    for kind in ComponentKind::ALL {
        let ids = manifests(root, kind)
            .into_iter()
            .filter(|manifest| accept(manifest))
            .map(|manifest| kind.id_from_path(&manifest))
            .filter(|id| !id.is_empty())
            .collect();
        detected.set(kind, ids);
    }
    detected
}

/// Detect every component under `root`
pub fn scan(root: &Path) -> DetectedComponents {
    scan_with(root, |_| true)
}

/// True when `path`, or one of its ancestors below `root`, is a symbolic link
pub fn is_link_managed(root: &Path, path: &Path) -> bool {
    path.ancestors()
        .take_while(|ancestor| *ancestor != root)
        .any(is_symlink)
}
