//! Inline link extraction, verification against a snapshot, and repair.
//!
//! Only `[text](target)` links are recognised. External (`scheme://`),
//! `mailto:`-style and bare fragment targets are skipped. Local targets are
//! resolved lexically: a leading `/` anchors at the docs root, anything else
//! is relative to the directory of the source file.

use crate::error::MaintError;
use crate::models::fix::{LinkFix, LinkFixReport};
use crate::models::{Issue, Report};
use crate::scan::FileSetSnapshot;
use crate::utils;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A `[text](target)` occurrence.
pub struct Link {
    pub text: String,
    pub target: String,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.text, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A link together with the file it was found in.
pub struct LinkRecord {
    pub source: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// External or fragment-only target.
    Skipped,
    /// Resolved to a path present in the snapshot.
    Resolved(String),
    /// Local target absent from the snapshot. Carries the normalised path
    /// when the target stayed inside the root.
    Broken(Option<String>),
}

impl Verdict {
    pub fn is_broken(&self) -> bool {
        matches!(self, Verdict::Broken(_))
    }
}

/// Extract every inline link from `text`, in order of appearance.
pub fn extract_links(text: &str) -> Vec<Link> {
    LINK_RE
        .captures_iter(text)
        .map(|c| Link {
            text: c[1].to_string(),
            target: c[2].to_string(),
        })
        .collect()
}

/// Whether a target is outside the scope of local resolution.
pub fn is_skipped(target: &str) -> bool {
    target.starts_with('#') || has_uri_scheme(target)
}

fn has_uri_scheme(target: &str) -> bool {
    if target.starts_with("http://") || target.starts_with("https://") {
        return true;
    }
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    // Single letters are left alone so `C:` style paths never count as schemes.
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    scheme.len() > 1
        && first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Drop the `#fragment` part of a target.
pub fn strip_fragment(target: &str) -> &str {
    match target.split_once('#') {
        Some((path, _)) => path,
        None => target,
    }
}

fn fragment_of(target: &str) -> Option<&str> {
    target.split_once('#').map(|(_, frag)| frag)
}

/// Normalise a local target relative to `source` (both `/`-separated).
///
/// Returns `None` when the target escapes the docs root.
pub fn resolve_target(target: &str, source: &str) -> Option<String> {
    let path = strip_fragment(target);
    if let Some(abs) = path.strip_prefix('/') {
        return utils::lexical_normalize(abs);
    }
    let dir = utils::parent_of(source);
    if dir.is_empty() {
        utils::lexical_normalize(path)
    } else {
        utils::lexical_normalize(&format!("{}/{}", dir, path))
    }
}

/// Decide whether `target`, found in `source`, resolves within `snapshot`.
pub fn verify_link(target: &str, source: &str, snapshot: &FileSetSnapshot) -> Verdict {
    if is_skipped(target) {
        return Verdict::Skipped;
    }
    match resolve_target(target, source) {
        Some(rel) if snapshot.contains(&rel) => Verdict::Resolved(rel),
        other => Verdict::Broken(other),
    }
}

fn read_text(snapshot: &FileSetSnapshot, rel: &str) -> Result<String, MaintError> {
    let path = snapshot.absolute(rel);
    fs::read_to_string(&path).map_err(|e| MaintError::from_read(path, e))
}

/// Check every link in every markdown file of the snapshot.
///
/// Files are read in parallel; the resulting issues are sorted by
/// `(file, text, target)` so output does not depend on scheduling.
pub fn verify_links(snapshot: &FileSetSnapshot) -> Report {
    let md_files = snapshot.markdown_files();
    let mut issues: Vec<Issue> = md_files
        .par_iter()
        .flat_map_iter(|rel| {
            let text = match read_text(snapshot, rel) {
                Ok(s) => s,
                Err(e) => {
                    warn!(file = %rel, error = %e, "cannot read markdown file");
                    return vec![Issue::from_error(rel, &e)];
                }
            };
            extract_links(&text)
                .into_iter()
                .filter(|l| verify_link(&l.target, rel, snapshot).is_broken())
                .map(|l| Issue::BrokenLink {
                    source: rel.to_string(),
                    text: l.text,
                    target: l.target,
                })
                .collect::<Vec<_>>()
        })
        .collect();
    issues.extend(snapshot.errors().iter().cloned());
    sort_issues(&mut issues);
    debug!(files = md_files.len(), issues = issues.len(), "verified links");
    Report::new(issues, md_files.len())
}

fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
}

fn sort_key(issue: &Issue) -> (&str, &str, &str) {
    match issue {
        Issue::BrokenLink {
            source,
            text,
            target,
        } => (source.as_str(), text.as_str(), target.as_str()),
        other => (other.file(), "", ""),
    }
}

/// Repair broken relative links whose file name matches exactly one file
/// in the snapshot. Fragments are preserved. Ambiguous links are reported
/// as unresolved and left untouched.
pub fn fix_links(snapshot: &FileSetSnapshot, dry_run: bool) -> LinkFixReport {
    let mut by_name: HashMap<&str, Vec<&str>> = HashMap::new();
    for rel in snapshot.iter() {
        by_name.entry(utils::file_name_of(rel)).or_default().push(rel);
    }

    let md_files = snapshot.markdown_files();
    let mut per_file: Vec<FileFix> = md_files
        .par_iter()
        .map(|rel| fix_file(snapshot, rel, &by_name, dry_run))
        .collect();
    per_file.sort_by(|a, b| a.source.cmp(&b.source));

    let mut report = LinkFixReport {
        files_processed: md_files.len(),
        ..LinkFixReport::default()
    };
    for f in per_file {
        if f.written {
            report.files_written += 1;
        }
        report.fixes.extend(f.fixes);
        report.unresolved.extend(f.unresolved);
        report.failures.extend(f.failures);
    }
    report.failures.extend(snapshot.errors().iter().cloned());
    sort_issues(&mut report.unresolved);
    sort_issues(&mut report.failures);
    report
}

struct FileFix {
    source: String,
    fixes: Vec<LinkFix>,
    unresolved: Vec<Issue>,
    failures: Vec<Issue>,
    written: bool,
}

fn fix_file(
    snapshot: &FileSetSnapshot,
    rel: &str,
    by_name: &HashMap<&str, Vec<&str>>,
    dry_run: bool,
) -> FileFix {
    let mut out = FileFix {
        source: rel.to_string(),
        fixes: Vec::new(),
        unresolved: Vec::new(),
        failures: Vec::new(),
        written: false,
    };
    let mut content = match read_text(snapshot, rel) {
        Ok(s) => s,
        Err(e) => {
            warn!(file = %rel, error = %e, "cannot read markdown file");
            out.failures.push(Issue::from_error(rel, &e));
            return out;
        }
    };

    let mut seen: HashSet<Link> = HashSet::new();
    for link in extract_links(&content) {
        if !seen.insert(link.clone()) {
            continue;
        }
        if !verify_link(&link.target, rel, snapshot).is_broken() {
            continue;
        }
        match repair_target(&link.target, rel, by_name) {
            Some(new_target) => out.fixes.push(LinkFix {
                source: rel.to_string(),
                text: link.text,
                from: link.target,
                to: new_target,
            }),
            None => out.unresolved.push(Issue::BrokenLink {
                source: rel.to_string(),
                text: link.text,
                target: link.target,
            }),
        }
    }

    if out.fixes.is_empty() {
        return out;
    }
    for fix in &out.fixes {
        let old = format!("[{}]({})", fix.text, fix.from);
        let new = format!("[{}]({})", fix.text, fix.to);
        content = content.replace(&old, &new);
        info!(file = %rel, from = %fix.from, to = %fix.to, "fixed link");
    }
    if dry_run {
        return out;
    }
    let path = snapshot.absolute(rel);
    match fs::write(&path, content) {
        Ok(()) => out.written = true,
        Err(source) => {
            let e = MaintError::Io { path, source };
            warn!(file = %rel, error = %e, "cannot write markdown file");
            out.failures.push(Issue::from_error(rel, &e));
        }
    }
    out
}

/// Find the unique snapshot file sharing the target's file name and express
/// it relative to the source file's directory.
fn repair_target(target: &str, source: &str, by_name: &HashMap<&str, Vec<&str>>) -> Option<String> {
    let path = strip_fragment(target);
    if path.starts_with('/') {
        return None;
    }
    let name = utils::file_name_of(path);
    let candidates = by_name.get(name)?;
    let [only] = candidates.as_slice() else {
        return None;
    };
    let base = Path::new(utils::parent_of(source));
    let rel = pathdiff::diff_paths(Path::new(only), base)?;
    let mut new_target = utils::to_slash(&rel);
    if let Some(frag) = fragment_of(target) {
        new_target.push('#');
        new_target.push_str(frag);
    }
    Some(new_target)
}
