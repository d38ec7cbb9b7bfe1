//! Table-of-contents and progress report generation.
//!
//! The TOC is a nested markdown list of the docs tree (directories rendered
//! as `- **name/**`), limited to `max_depth` levels. The progress report
//! lists directories with no files at all and directories that hold files
//! but no markdown. Both outputs are regenerated wholesale on every run.

use crate::error::MaintError;
use crate::models::Issue;
use crate::utils;
use crate::walk;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Scan outcome used to render both documents.
pub struct TocScan {
    pub lines: Vec<String>,
    pub empty_dirs: BTreeSet<String>,
    pub no_markdown_dirs: BTreeSet<String>,
    /// Entries that could not be read.
    pub errors: Vec<Issue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Paths written by `write_toc`, plus progress counts.
pub struct TocOutcome {
    pub toc_file: String,
    pub progress_file: String,
    pub entries: usize,
    pub empty_dirs: usize,
    pub no_markdown_dirs: usize,
    pub issues: Vec<Issue>,
}

/// Scan `root` up to `max_depth` directory levels, skipping hidden entries
/// and any path listed in `exclude` (relative, `/`-separated) together with
/// everything below it.
pub fn scan_toc(root: &Path, max_depth: usize, exclude: &[String]) -> Result<TocScan, MaintError> {
    let tree = walk::walk_tree(root, Some(max_depth))?;
    let excluded = |rel: &str| {
        exclude
            .iter()
            .any(|x| rel == x || rel.strip_prefix(x.as_str()).is_some_and(|r| r.starts_with('/')))
    };

    let mut scan = TocScan {
        errors: tree.errors,
        ..TocScan::default()
    };
    let mut dirs: Vec<(String, usize)> = Vec::new();
    // Directories whose subtree (within depth) holds at least one file.
    let mut with_files: BTreeSet<String> = BTreeSet::new();
    // Per directory: (holds a file, holds a markdown file).
    let mut direct: BTreeMap<String, (bool, bool)> = BTreeMap::new();

    for entry in tree.entries.into_iter().filter(|e| !excluded(&e.rel)) {
        let indent = "  ".repeat(entry.depth - 1);
        if entry.is_dir {
            scan.lines.push(format!("{}- **{}/**", indent, entry.name));
            dirs.push((entry.rel, entry.depth));
            continue;
        }
        scan.lines.push(format!("{}- {}", indent, entry.name));
        let parent = utils::parent_of(&entry.rel);
        let stats = direct.entry(parent.to_string()).or_default();
        stats.0 = true;
        stats.1 |= entry.name.ends_with(".md");
        let mut cur = parent;
        while !cur.is_empty() {
            with_files.insert(cur.to_string());
            cur = utils::parent_of(cur);
        }
    }

    for (rel, depth) in dirs {
        if depth < max_depth && !with_files.contains(&rel) {
            scan.empty_dirs.insert(rel);
        }
    }
    for (dir, (has_file, has_md)) in direct {
        if has_file && !has_md {
            scan.no_markdown_dirs
                .insert(if dir.is_empty() { ".".to_string() } else { dir });
        }
    }
    debug!(
        root = %root.display(),
        entries = scan.lines.len(),
        errors = scan.errors.len(),
        "scanned tree for index"
    );
    Ok(scan)
}

pub fn render_toc(scan: &TocScan) -> String {
    let mut out = vec!["# Table of Contents".to_string(), String::new()];
    out.extend(scan.lines.iter().cloned());
    out.join("\n") + "\n"
}

pub fn render_progress(scan: &TocScan) -> String {
    let mut out = vec!["# Content Progress".to_string(), String::new()];
    out.push(format!(
        "## Empty directories (no files): {}",
        scan.empty_dirs.len()
    ));
    out.extend(scan.empty_dirs.iter().map(|d| format!("- {}", d)));
    out.push(String::new());
    out.push(format!(
        "## Directories without markdown files: {}",
        scan.no_markdown_dirs.len()
    ));
    out.extend(scan.no_markdown_dirs.iter().map(|d| format!("- {}", d)));
    out.join("\n") + "\n"
}

/// Output files and their ancestor directories, which never appear in the index.
fn output_exclusions(outputs: &[&str]) -> Vec<String> {
    let mut exclude = Vec::new();
    for out in outputs {
        let Some(mut cur) = utils::lexical_normalize(out) else {
            continue;
        };
        while !cur.is_empty() {
            if !exclude.contains(&cur) {
                exclude.push(cur.clone());
            }
            cur = utils::parent_of(&cur).to_string();
        }
    }
    exclude
}

/// Scan `root` and write both documents under it, creating parent dirs.
///
/// The output locations are left out of the listing so repeated runs
/// produce identical files.
pub fn write_toc(
    root: &Path,
    toc_file: &str,
    progress_file: &str,
    max_depth: usize,
) -> Result<TocOutcome, MaintError> {
    let exclude = output_exclusions(&[toc_file, progress_file]);
    let scan = scan_toc(root, max_depth, &exclude)?;
    let toc_path = root.join(toc_file);
    let progress_path = root.join(progress_file);
    write_file(&toc_path, &render_toc(&scan))?;
    write_file(&progress_path, &render_progress(&scan))?;
    info!(toc = %toc_path.display(), progress = %progress_path.display(), "wrote index files");
    Ok(TocOutcome {
        toc_file: toc_path.to_string_lossy().to_string(),
        progress_file: progress_path.to_string_lossy().to_string(),
        entries: scan.lines.len(),
        empty_dirs: scan.empty_dirs.len(),
        no_markdown_dirs: scan.no_markdown_dirs.len(),
        issues: scan.errors,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), MaintError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| MaintError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| MaintError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("01-Intro/01-Empty")).unwrap();
        fs::create_dir_all(root.join("02-Code")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("01-Intro/01-Start.md"), "x").unwrap();
        fs::write(root.join("02-Code/main.go"), "x").unwrap();
        fs::write(root.join("README.md"), "x").unwrap();
        tmp
    }

    #[test]
    fn test_scan_toc_nested_listing_and_progress() {
        let tmp = fixture();
        let scan = scan_toc(tmp.path(), 4, &[]).unwrap();
        assert_eq!(
            scan.lines,
            vec![
                "- **01-Intro/**",
                "  - **01-Empty/**",
                "  - 01-Start.md",
                "- **02-Code/**",
                "  - main.go",
                "- README.md",
            ]
        );
        assert_eq!(
            scan.empty_dirs.iter().collect::<Vec<_>>(),
            vec!["01-Intro/01-Empty"]
        );
        assert_eq!(
            scan.no_markdown_dirs.iter().collect::<Vec<_>>(),
            vec!["02-Code"]
        );
    }

    #[test]
    fn test_output_exclusions_cover_ancestors() {
        let ex = output_exclusions(&["nav/index/TOC.md", "nav/progress.md"]);
        assert_eq!(
            ex,
            vec!["nav/index/TOC.md", "nav/index", "nav", "nav/progress.md"]
        );
    }

    #[test]
    fn test_scan_toc_respects_max_depth() {
        let tmp = fixture();
        let scan = scan_toc(tmp.path(), 1, &[]).unwrap();
        assert_eq!(scan.lines, vec!["- **01-Intro/**", "- **02-Code/**", "- README.md"]);
        assert!(scan.empty_dirs.is_empty());
        assert!(scan.no_markdown_dirs.is_empty());
    }

    #[test]
    fn test_excluded_directory_hides_its_subtree() {
        let tmp = fixture();
        fs::create_dir_all(tmp.path().join("nav/deep")).unwrap();
        fs::write(tmp.path().join("nav/deep/TOC.md"), "x").unwrap();
        fs::write(tmp.path().join("navigation.md"), "x").unwrap();
        let scan = scan_toc(tmp.path(), 4, &["nav".to_string()]).unwrap();
        assert!(scan.lines.iter().all(|l| !l.contains("**nav/**") && !l.contains("deep")));
        assert!(scan.lines.contains(&"- navigation.md".to_string()));
    }

    #[test]
    fn test_write_toc_is_stable_across_runs() {
        let tmp = fixture();
        let root = tmp.path();
        let toc = "navigation-index/TOC.md";
        let progress = "navigation-index/progress.md";
        let first = write_toc(root, toc, progress, 4).unwrap();
        let text1 = fs::read_to_string(root.join(toc)).unwrap();
        write_toc(root, toc, progress, 4).unwrap();
        let text2 = fs::read_to_string(root.join(toc)).unwrap();
        assert!(text1.starts_with("# Table of Contents\n"));
        assert!(!text1.contains("navigation-index"));
        assert_eq!(text1, text2);
        assert_eq!(first.empty_dirs, 1);
        let prog = fs::read_to_string(root.join(progress)).unwrap();
        assert!(prog.contains("- 01-Intro/01-Empty"));
    }
}
