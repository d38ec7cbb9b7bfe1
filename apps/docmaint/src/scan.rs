//! Tree scanner producing an immutable snapshot of relative file paths.
//!
//! Hidden entries (leading `.`) are skipped and symlinked directories are not
//! followed. Paths are stored with `/` separators so membership checks do not
//! depend on the host platform. Entries the walk could not read are kept as
//! `FileError` issues alongside the snapshot.

use crate::error::MaintError;
use crate::models::Issue;
use crate::walk;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileSetSnapshot {
    root: PathBuf,
    files: BTreeSet<String>,
    errors: Vec<Issue>,
}

impl FileSetSnapshot {
    /// Walk `root` recursively and capture every non-hidden file.
    ///
    /// Fails with `NotFound` when `root` is missing or not a directory.
    /// Unreadable entries are recorded in `errors()`.
    pub fn scan(root: &Path) -> Result<Self, MaintError> {
        let tree = walk::walk_tree(root, None)?;
        let files: BTreeSet<String> = tree
            .entries
            .into_iter()
            .filter(|e| !e.is_dir && e.path.is_file())
            .map(|e| e.rel)
            .collect();
        debug!(
            root = %root.display(),
            files = files.len(),
            errors = tree.errors.len(),
            "scanned docs tree"
        );
        Ok(FileSetSnapshot {
            root: root.to_path_buf(),
            files,
            errors: tree.errors,
        })
    }

    /// Build a snapshot from already-known relative paths.
    pub fn from_paths<I, S>(root: &Path, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let files = paths
            .into_iter()
            .map(|p| p.as_ref().replace('\\', "/"))
            .collect();
        FileSetSnapshot {
            root: root.to_path_buf(),
            files,
            errors: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.files.contains(rel)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All relative paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    /// Markdown files in sorted order.
    pub fn markdown_files(&self) -> Vec<&str> {
        self.iter().filter(|p| p.ends_with(".md")).collect()
    }

    pub fn absolute(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Entries that could not be read while scanning.
    pub fn errors(&self) -> &[Issue] {
        &self.errors
    }
}
