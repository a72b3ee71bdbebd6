//! File system helpers shared by the installation backends
//!
//! - Package walking with hidden and build-cache paths filtered out
//! - Directory creation and empty-directory pruning
//! - Removal of package files from a target

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{RegistryError, Result, write_failed};

/// Top-level directories created in the target before installing
pub const BASE_DIRS: &[&str] = &["agents", "skills", "commands"];

/// Directory names never installed from a package
const EXCLUDED_DIRS: &[&str] = &["__pycache__"];

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_failed(parent, &e))?;
    }
    Ok(())
}

/// Create the base component directories under `target`
pub fn ensure_base_dirs(target: &Path) -> Result<()> {
    for dir in BASE_DIRS {
        let path = target.join(dir);
        fs::create_dir_all(&path).map_err(|e| write_failed(&path, &e))?;
    }
    Ok(())
}

/// True when a package-relative path is hidden or inside a build cache
pub fn is_excluded(relative: &Path) -> bool {
    relative.components().any(|component| {
        let name = component.as_os_str().to_string_lossy();
        name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
    })
}

/// A file to install: its absolute source path and its path relative to the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFile {
    pub source: PathBuf,
    pub relative: PathBuf,
}

/// Walk every installable file of a package, in sorted order.
///
/// Walk errors are yielded instead of aborting so callers can record them
/// per entry and continue.
pub fn package_files(package_dir: &Path) -> impl Iterator<Item = Result<PackageFile>> + '_ {
    WalkDir::new(package_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| {
            entry
                .path()
                .strip_prefix(package_dir)
                .map_or(true, |rel| !is_excluded(rel))
        })
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_dir() => None,
            Ok(entry) => {
                let relative = entry.path().strip_prefix(package_dir).ok()?.to_path_buf();
                Some(Ok(PackageFile {
                    source: entry.path().to_path_buf(),
                    relative,
                }))
            }
            Err(e) => Some(Err(RegistryError::IoError {
                message: e.to_string(),
            })),
        })
}

/// Every file path of a package relative to its root, without filtering
pub fn all_relative_files(package_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(package_dir)
        .min_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| !entry.file_type().is_dir())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(package_dir)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect()
}

/// True when `path` is a symbolic link, dangling or not
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}

/// Remove empty directories below `root`, deepest first. `root` itself is kept.
///
/// Returns how many directories were removed.
pub fn prune_empty_dirs(root: &Path) -> usize {
    let mut removed = 0;
    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
    {
        let is_empty = fs::read_dir(entry.path()).is_ok_and(|mut it| it.next().is_none());
        if is_empty {
            match fs::remove_dir(entry.path()) {
                Ok(()) => {
                    debug!("Removed empty directory {}", entry.path().display());
                    removed += 1;
                }
                Err(e) => warn!("Could not remove {}: {e}", entry.path().display()),
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_ensure_parent_dir() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("subdir/nested/file.txt");
        ensure_parent_dir(&file_path).unwrap();
        assert!(file_path.parent().unwrap().exists());
    }

    #[test]
    fn test_is_excluded() {
        assert!(is_excluded(Path::new(".git/config")));
        assert!(is_excluded(Path::new("skills/pdf/__pycache__/x.pyc")));
        assert!(is_excluded(Path::new("agents/.hidden.md")));
        assert!(!is_excluded(Path::new("agents/build.md")));
        assert!(!is_excluded(Path::new("agents/_shared/common.md")));
    }

    #[test]
    fn test_package_files_skips_hidden_and_cache() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "agents/build.md");
        touch(temp.path(), "agents/.draft.md");
        touch(temp.path(), ".DS_Store");
        touch(temp.path(), "skills/pdf/SKILL.md");
        touch(temp.path(), "skills/pdf/__pycache__/tool.pyc");

        let files: Vec<PathBuf> = package_files(temp.path())
            .map(|f| f.unwrap().relative)
            .collect();
        assert_eq!(
            files,
            vec![PathBuf::from("agents/build.md"), PathBuf::from("skills/pdf/SKILL.md")]
        );
    }

    #[test]
    fn test_all_relative_files_is_unfiltered() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "agents/build.md");
        touch(temp.path(), "agents/.draft.md");
        assert_eq!(all_relative_files(temp.path()).len(), 2);
    }

    #[test]
    fn test_prune_empty_dirs_keeps_root_and_non_empty() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b/c")).unwrap();
        touch(temp.path(), "keep/file.md");

        assert_eq!(prune_empty_dirs(temp.path()), 3);
        assert!(temp.path().exists());
        assert!(!temp.path().join("a").exists());
        assert!(temp.path().join("keep/file.md").exists());
    }

    #[test]
    fn test_ensure_base_dirs() {
        let temp = TempDir::new().unwrap();
        ensure_base_dirs(temp.path()).unwrap();
        for dir in BASE_DIRS {
            assert!(temp.path().join(dir).is_dir());
        }
    }
}
