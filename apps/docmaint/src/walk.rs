//! Single directory walker shared by the scanner, naming and TOC passes.
//!
//! Entries come back in depth-first order with siblings sorted by name.
//! Hidden entries (and everything below them) are pruned and symlinks are
//! not followed. Entries that cannot be read are returned as `FileError`
//! issues instead of being dropped.

use crate::error::MaintError;
use crate::models::Issue;
use crate::utils;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Root-relative, `/`-separated path.
    pub rel: String,
    pub name: String,
    /// 1 for direct children of the root.
    pub depth: usize,
    pub is_dir: bool,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct TreeWalk {
    pub entries: Vec<TreeEntry>,
    pub errors: Vec<Issue>,
}

/// Walk `root`, descending at most `max_depth` levels when given.
///
/// Fails with `NotFound` when `root` is missing or not a directory.
pub fn walk_tree(root: &Path, max_depth: Option<usize>) -> Result<TreeWalk, MaintError> {
    if !root.is_dir() {
        return Err(MaintError::NotFound {
            path: root.to_path_buf(),
        });
    }
    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    let mut out = TreeWalk::default();
    let iter = walker
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !utils::is_hidden(&e.file_name().to_string_lossy()));
    for item in iter {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                let rel = err
                    .path()
                    .map(|p| rel_of(root, p))
                    .unwrap_or_else(|| ".".to_string());
                let e = MaintError::Io {
                    path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                    source: io::Error::from(err),
                };
                warn!(path = %rel, error = %e, "cannot read entry");
                out.errors.push(Issue::from_error(&rel, &e));
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let ft = entry.file_type();
        // Symlinked directories are listed as plain entries, never descended.
        let is_dir = ft.is_dir();
        out.entries.push(TreeEntry {
            rel: rel_of(root, entry.path()),
            name: entry.file_name().to_string_lossy().to_string(),
            depth: entry.depth(),
            is_dir,
            path: entry.into_path(),
        });
    }
    Ok(out)
}

fn rel_of(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => utils::to_slash(rel),
        _ => ".".to_string(),
    }
}
