//! Discovery of files marked `-text` in the project's attribute manifest.
//!
//! Patterns containing `**` are expanded with a recursive glob under the project
//! root. Other patterns are matched fnmatch-style (`*` may cross `/`) against
//! the root-relative path of every file in the tree.
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::manifest::{marked_patterns, read_manifest};
use crate::core::params::SelectParams;
use crate::error::{Error, Result};

const FNMATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Collect root-relative paths of every file whose manifest pattern carries
/// the disable-normalization marker.
pub fn select_marked_files(root: &Path, params: &SelectParams) -> Result<BTreeSet<PathBuf>> {
    let manifest_path = root.join(&params.manifest);
    let entries = match read_manifest(&manifest_path)? {
        Some(entries) => entries,
        None => {
            info!("No {} file found.", manifest_path.display());
            return Ok(BTreeSet::new());
        }
    };

    let mut selected = BTreeSet::new();
    for pattern in marked_patterns(&entries) {
        match files_for_pattern(root, pattern) {
            Ok(files) => {
                debug!("Pattern '{}' matched {} file(s)", pattern, files.len());
                selected.extend(files);
            }
            Err(e) => warn!("Skipping pattern: {}", e),
        }
    }

    Ok(selected)
}

/// Files under `root` matched by a single manifest pattern.
pub fn files_for_pattern(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    // Anchored patterns are relative to the root, never to `/`.
    let pattern = pattern.trim_start_matches('/');
    if Path::new(pattern)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::UnsafePath {
            path: PathBuf::from(pattern),
        });
    }

    if pattern.contains("**") {
        expand_recursive(root, pattern)
    } else {
        match_tree(root, pattern)
    }
}

fn expand_recursive(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let mut full = format!(
        "{}/{}",
        Pattern::escape(&root.to_string_lossy()).trim_end_matches('/'),
        pattern
    );
    // A trailing `**` only yields directories; descend to their files.
    if full.ends_with("**") {
        full.push_str("/*");
    }

    let paths = glob::glob(&full).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for path in paths.filter_map(|p| p.ok()) {
        let Some(rel) = relative_to(root, &path) else {
            warn!("Skipping path outside the project root: {}", path.display());
            continue;
        };
        if rel.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        if !is_regular_file_in_tree(root, &rel) {
            debug!("Skipping symlink or non-file: {}", path.display());
            continue;
        }
        files.push(rel);
    }
    Ok(files)
}

/// `rel` names a regular file reached without following any symlink under `root`.
fn is_regular_file_in_tree(root: &Path, rel: &Path) -> bool {
    let mut current = root.to_path_buf();
    let mut components = rel.components().peekable();
    while let Some(c) = components.next() {
        current.push(c);
        let Ok(meta) = fs::symlink_metadata(&current) else {
            return false;
        };
        let kind = meta.file_type();
        let ok = if components.peek().is_some() {
            kind.is_dir()
        } else {
            kind.is_file()
        };
        if !ok {
            return false;
        }
    }
    true
}

fn match_tree(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = Pattern::new(pattern).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && e.file_name() == ".git"))
        .filter_map(std::result::Result::ok)
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_safe_file_name(&name) {
            warn!("Skipping file with unsafe name: {}", name);
            continue;
        }

        let Some(rel) = relative_to(root, entry.path()) else {
            continue;
        };
        if matcher.matches_with(&to_slash(&rel), FNMATCH_OPTIONS) {
            files.push(rel);
        }
    }
    Ok(files)
}

/// A discovered file name must not smuggle in a separator or `..`.
pub fn is_safe_file_name(name: &str) -> bool {
    !(name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) || name.contains(".."))
}

/// True for a non-empty relative path made only of normal components.
pub fn is_safe_relative(path: &Path) -> bool {
    let mut normal = false;
    for c in path.components() {
        match c {
            Component::Normal(_) => normal = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    normal
}

fn relative_to(root: &Path, path: &Path) -> Option<PathBuf> {
    let rel = match path.strip_prefix(root) {
        Ok(rel) => rel,
        Err(_) if path.is_relative() && root.components().all(|c| c == Component::CurDir) => path,
        Err(_) => return None,
    };
    let rel: PathBuf = rel
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    is_safe_relative(&rel).then_some(rel)
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
