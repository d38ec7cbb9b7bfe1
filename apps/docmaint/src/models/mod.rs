//! Shared data models for validation reports and fix-pass outcomes.

pub mod fix;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Whether a naming issue concerns a directory or a file.
pub enum EntryKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
/// A single detected problem. Paths are relative to the docs root.
pub enum Issue {
    Naming {
        path: String,
        entry: EntryKind,
        description: String,
    },
    BrokenLink {
        source: String,
        text: String,
        target: String,
    },
    /// A file that could not be read or written; `error` is the error kind.
    FileError {
        path: String,
        error: String,
        message: String,
    },
    RenameFailed {
        from: String,
        to: String,
        error: String,
        message: String,
    },
}

impl Issue {
    /// The file the issue is attached to; used for grouping and sorting.
    pub fn file(&self) -> &str {
        match self {
            Issue::Naming { path, .. } => path,
            Issue::BrokenLink { source, .. } => source,
            Issue::FileError { path, .. } => path,
            Issue::RenameFailed { from, .. } => from,
        }
    }

    pub fn from_error(path: &str, err: &crate::error::MaintError) -> Self {
        Issue::FileError {
            path: path.to_string(),
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers.
pub struct Summary {
    pub issues: usize,
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Validation results container. Built once and never mutated afterwards.
pub struct Report {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl Report {
    pub fn new(issues: Vec<Issue>, files: usize) -> Self {
        let summary = Summary {
            issues: issues.len(),
            files,
        };
        Report { issues, summary }
    }

    /// Process exit code: 0 when clean, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.issues.is_empty() {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_exit_code_and_summary() {
        let clean = Report::new(Vec::new(), 3);
        assert_eq!(clean.exit_code(), 0);
        assert_eq!(clean.summary.files, 3);

        let dirty = Report::new(
            vec![Issue::Naming {
                path: "intro.md".into(),
                entry: EntryKind::File,
                description: "bad".into(),
            }],
            1,
        );
        assert_eq!(dirty.exit_code(), 1);
        assert_eq!(dirty.summary.issues, 1);
        assert_eq!(dirty.issues[0].file(), "intro.md");
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let is = Issue::BrokenLink {
            source: "01-Intro.md".into(),
            text: "see".into(),
            target: "./02-Next.md".into(),
        };
        let v = serde_json::to_value(&is).unwrap();
        assert_eq!(v["kind"], "broken-link");
        assert_eq!(v["source"], "01-Intro.md");
    }
}
