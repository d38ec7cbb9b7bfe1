//! Outcomes of the in-place fix passes (renames and link rewrites).

use super::{EntryKind, Issue};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One applied rename, relative to the docs root.
pub struct Rename {
    pub from: String,
    pub to: String,
    pub entry: EntryKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Result of `fix-naming`.
pub struct FixNamingReport {
    pub renames: Vec<Rename>,
    /// Naming issues for which no fix was attempted.
    pub unresolved: Vec<Issue>,
    pub failures: Vec<Issue>,
}

impl FixNamingReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One rewritten link.
pub struct LinkFix {
    pub source: String,
    pub text: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Result of `fix-links`.
pub struct LinkFixReport {
    pub fixes: Vec<LinkFix>,
    /// Broken links with zero or several candidate targets.
    pub unresolved: Vec<Issue>,
    pub failures: Vec<Issue>,
    pub files_processed: usize,
    pub files_written: usize,
}

impl LinkFixReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty() && self.failures.is_empty()
    }
}
