//! Naming convention validation and normalisation.
//!
//! Directories must be named `NN-Name-Format` and markdown files
//! `NN-Name-Format.md` (two-digit prefix, capitalised hyphenated words).
//! `README.md` and configured exemptions are skipped.
//!
//! The fix pass only touches names that already look like `<digits>-<rest>`;
//! anything else is reported and left alone.

use crate::error::MaintError;
use crate::models::fix::{FixNamingReport, Rename};
use crate::models::{EntryKind, Issue, Report};
use crate::utils;
use crate::walk;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[A-Z][A-Za-z0-9-]*$").expect("valid regex"));
static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}-[A-Z][A-Za-z0-9-]*\.md$").expect("valid regex"));
static LOOSE_DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-(.+)$").expect("valid regex"));
static LOOSE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-(.+)\.md$").expect("valid regex"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][a-z0-9]*|[a-z0-9]+").expect("valid regex"));

const DIR_ISSUE: &str = "Directory name doesn't follow pattern NN-Name-Format";
const FILE_ISSUE: &str = "File name doesn't follow pattern NN-Name-Format.md";

#[derive(Debug, Clone)]
/// Naming convention for directories and markdown files.
pub struct NamingRule {
    exempt: Vec<String>,
}

impl Default for NamingRule {
    fn default() -> Self {
        NamingRule {
            exempt: vec!["README.md".to_string()],
        }
    }
}

impl NamingRule {
    /// Rule with additional exempt file names. `README.md` is always exempt.
    pub fn with_exempt<I: IntoIterator<Item = String>>(extra: I) -> Self {
        let mut rule = NamingRule::default();
        for name in extra {
            if !rule.exempt.contains(&name) {
                rule.exempt.push(name);
            }
        }
        rule
    }

    pub fn is_valid_dir(&self, name: &str) -> bool {
        DIR_RE.is_match(name)
    }

    pub fn is_exempt(&self, name: &str) -> bool {
        self.exempt.iter().any(|e| e == name)
    }

    /// Whether a markdown file name is acceptable (valid or exempt).
    pub fn is_valid_file(&self, name: &str) -> bool {
        self.is_exempt(name) || FILE_RE.is_match(name)
    }
}

/// Derive a conforming name from a loosely numbered one.
///
/// Pads the numeric prefix to two digits and rewrites the remainder as
/// capitalised words joined by hyphens. Returns `None` when the name does
/// not have the `<digits>-<rest>` shape or no words survive.
pub fn fix_name(name: &str, entry: EntryKind) -> Option<String> {
    let re = match entry {
        EntryKind::Directory => &*LOOSE_DIR_RE,
        EntryKind::File => &*LOOSE_FILE_RE,
    };
    let caps = re.captures(name)?;
    let number = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    let words: Vec<String> = WORD_RE
        .find_iter(rest)
        .map(|m| capitalize(m.as_str()))
        .collect();
    if words.is_empty() {
        return None;
    }
    let fixed = format!("{:0>2}-{}", number, words.join("-"));
    Some(match entry {
        EntryKind::Directory => fixed,
        EntryKind::File => format!("{}.md", fixed),
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[derive(Debug, Clone)]
struct Offender {
    rel: String,
    name: String,
    entry: EntryKind,
}

impl Offender {
    fn issue(&self) -> Issue {
        Issue::Naming {
            path: self.rel.clone(),
            entry: self.entry,
            description: match self.entry {
                EntryKind::Directory => DIR_ISSUE.to_string(),
                EntryKind::File => FILE_ISSUE.to_string(),
            },
        }
    }

    fn depth(&self) -> usize {
        self.rel.matches('/').count()
    }
}

/// Report every non-conforming directory and markdown file under `root`,
/// in traversal order (entries sorted by name at each level). Entries that
/// could not be read follow as `FileError` issues.
pub fn validate_naming(root: &Path, rule: &NamingRule) -> Result<Report, MaintError> {
    let found = collect_offenders(root, rule)?;
    let mut issues: Vec<Issue> = found.offenders.iter().map(Offender::issue).collect();
    issues.extend(found.errors);
    Ok(Report::new(issues, found.checked))
}

/// Rename fixable offenders in place.
///
/// Deeper entries are renamed first so parent renames never invalidate a
/// pending child path. Per-item failures are recorded and do not stop the
/// batch.
pub fn fix_naming(root: &Path, rule: &NamingRule) -> Result<FixNamingReport, MaintError> {
    let found = collect_offenders(root, rule)?;
    let mut offenders = found.offenders;
    offenders.sort_by(|a, b| b.depth().cmp(&a.depth()));

    let mut report = FixNamingReport {
        failures: found.errors,
        ..FixNamingReport::default()
    };
    for off in offenders {
        let Some(new_name) = fix_name(&off.name, off.entry).filter(|n| *n != off.name) else {
            debug!(path = %off.rel, "no fix derivable; leaving as is");
            report.unresolved.push(off.issue());
            continue;
        };
        let parent_rel = utils::parent_of(&off.rel);
        let to_rel = if parent_rel.is_empty() {
            new_name.clone()
        } else {
            format!("{}/{}", parent_rel, new_name)
        };
        let from = root.join(&off.rel);
        let to = root.join(&to_rel);
        match rename_entry(&from, &to, &off.name, &new_name) {
            Ok(()) => {
                info!(from = %off.rel, to = %to_rel, "renamed");
                report.renames.push(Rename {
                    from: off.rel,
                    to: to_rel,
                    entry: off.entry,
                });
            }
            Err(e) => {
                warn!(from = %off.rel, error = %e, "rename failed");
                report.failures.push(Issue::RenameFailed {
                    from: off.rel,
                    to: to_rel,
                    error: e.kind().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}

fn rename_entry(from: &Path, to: &Path, old_name: &str, new_name: &str) -> Result<(), MaintError> {
    let io_err = |source: io::Error| MaintError::Io {
        path: from.to_path_buf(),
        source,
    };
    // On case-insensitive filesystems a case-only change sees itself as the
    // target, so only an entry carrying exactly `new_name` counts there.
    let taken = if old_name.eq_ignore_ascii_case(new_name) {
        has_exact_entry(to, new_name).map_err(io_err)?
    } else {
        to.exists()
    };
    if taken {
        return Err(MaintError::RenameConflict {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(io_err)
}

fn has_exact_entry(path: &Path, name: &str) -> io::Result<bool> {
    let Some(parent) = path.parent() else {
        return Ok(false);
    };
    for entry in fs::read_dir(parent)? {
        if entry?.file_name() == name {
            return Ok(true);
        }
    }
    Ok(false)
}

struct Offenders {
    offenders: Vec<Offender>,
    checked: usize,
    errors: Vec<Issue>,
}

fn collect_offenders(root: &Path, rule: &NamingRule) -> Result<Offenders, MaintError> {
    let tree = walk::walk_tree(root, None)?;
    let mut found = Offenders {
        offenders: Vec::new(),
        checked: 0,
        errors: tree.errors,
    };
    for entry in tree.entries {
        let (valid, kind) = if entry.is_dir {
            (rule.is_valid_dir(&entry.name), EntryKind::Directory)
        } else if entry.name.ends_with(".md") {
            (rule.is_valid_file(&entry.name), EntryKind::File)
        } else {
            continue;
        };
        found.checked += 1;
        if !valid {
            found.offenders.push(Offender {
                rel: entry.rel,
                name: entry.name,
                entry: kind,
            });
        }
    }
    Ok(found)
}
