//! Heuristic metrics for source samples embedded in the docs tree.
//!
//! Analysis sits behind `CodeQualityAnalyzer` so the regex heuristics stay
//! separate from the naming and link passes. Nothing here parses code; the
//! numbers are pattern counts and are informational only.

use crate::error::MaintError;
use crate::models::Issue;
use crate::utils;
use glob::{glob_with, MatchOptions, Pattern};
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorHandling {
    pub has_error_returns: bool,
    pub has_error_checks: bool,
    pub has_panic_recovery: bool,
    /// 0..=3, one point per property above.
    pub score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeMetrics {
    pub lines: usize,
    pub functions: usize,
    pub goroutines: usize,
    pub channels: usize,
    pub mutexes: usize,
    pub error_handling: ErrorHandling,
    pub leak_hints: Vec<String>,
}

/// Capability for computing metrics over a single source text.
pub trait CodeQualityAnalyzer: Sync {
    fn name(&self) -> &'static str;
    fn analyze(&self, source: &str) -> CodeMetrics;
}

static FUNC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"func\s+\w+\s*\([^)]*\)").expect("valid regex"));
static GOROUTINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bgo\s+\w+\s*\(").expect("valid regex"));
static CHAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"make\s*\(\s*chan\s+").expect("valid regex"));
static MUTEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sync\.(Mutex|RWMutex)").expect("valid regex"));
static ERR_RETURN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"error\s*\)").expect("valid regex"));
static ERR_CHECK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"if\s+err\s*!=").expect("valid regex"));
static RECOVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"defer\s+(recover\(|func\s*\(\)\s*\{[^}]*recover\()").expect("valid regex")
});
static CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.Close\(\)").expect("valid regex"));
static OS_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"os\.(Open|Create|OpenFile)\(").expect("valid regex"));
static HTTP_GET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\.(Get|Post)\(").expect("valid regex"));
static CANCEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"context\.(WithCancel|WithTimeout|WithDeadline|CancelFunc)").expect("valid regex")
});

#[derive(Debug, Clone, Copy, Default)]
/// Regex heuristics for Go samples.
pub struct GoHeuristicAnalyzer;

impl CodeQualityAnalyzer for GoHeuristicAnalyzer {
    fn name(&self) -> &'static str {
        "go-heuristic"
    }

    fn analyze(&self, source: &str) -> CodeMetrics {
        let goroutines = GOROUTINE_RE.find_iter(source).count();
        let has_error_returns = ERR_RETURN_RE.is_match(source);
        let has_error_checks = ERR_CHECK_RE.is_match(source);
        let has_panic_recovery = RECOVER_RE.is_match(source);
        let score = [has_error_returns, has_error_checks, has_panic_recovery]
            .iter()
            .filter(|b| **b)
            .count() as u8;

        let has_close = CLOSE_RE.is_match(source);
        let mut leak_hints = Vec::new();
        if OS_OPEN_RE.is_match(source) && !has_close {
            leak_hints.push("file handle may not be closed".to_string());
        }
        if HTTP_GET_RE.is_match(source) && !has_close {
            leak_hints.push("HTTP response body may not be closed".to_string());
        }
        if goroutines > 0 && !CANCEL_RE.is_match(source) {
            leak_hints.push("goroutine launched without a cancellation context".to_string());
        }

        CodeMetrics {
            lines: source.lines().count(),
            functions: FUNC_RE.find_iter(source).count(),
            goroutines,
            channels: CHAN_RE.find_iter(source).count(),
            mutexes: MUTEX_RE.find_iter(source).count(),
            error_handling: ErrorHandling {
                has_error_returns,
                has_error_checks,
                has_panic_recovery,
                score,
            },
            leak_hints,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetrics {
    pub file: String,
    pub metrics: CodeMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualitySummary {
    pub files: usize,
    pub lines: usize,
    pub functions: usize,
    pub goroutines: usize,
    pub channels: usize,
    pub mutexes: usize,
    pub leak_hints: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub analyzer: String,
    pub files: Vec<FileMetrics>,
    pub issues: Vec<Issue>,
    pub summary: QualitySummary,
}

/// Find source files under `root` with any of `extensions` (hidden entries
/// excluded), sorted by relative path.
pub fn find_sources(root: &Path, extensions: &[String]) -> Result<Vec<String>, MaintError> {
    if !root.is_dir() {
        return Err(MaintError::NotFound {
            path: root.to_path_buf(),
        });
    }
    let opts = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let base = Pattern::escape(&root.to_string_lossy());
    let mut out = Vec::new();
    for ext in extensions {
        let pattern = format!("{}/**/*.{}", base, ext.trim_start_matches('.'));
        let Ok(paths) = glob_with(&pattern, opts) else {
            warn!(pattern = %pattern, "invalid source pattern");
            continue;
        };
        for path in paths.flatten() {
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(utils::to_slash(rel));
            }
        }
    }
    out.sort();
    out.dedup();
    Ok(out)
}

/// Run `analyzer` over every matching source file under `root`.
pub fn analyze_tree(
    root: &Path,
    analyzer: &dyn CodeQualityAnalyzer,
    extensions: &[String],
) -> Result<QualityReport, MaintError> {
    let sources = find_sources(root, extensions)?;
    let mut files = Vec::new();
    let mut issues = Vec::new();
    for rel in sources {
        let path = root.join(&rel);
        match fs::read_to_string(&path) {
            Ok(text) => files.push(FileMetrics {
                metrics: analyzer.analyze(&text),
                file: rel,
            }),
            Err(e) => {
                let err = MaintError::from_read(path, e);
                warn!(file = %rel, error = %err, "cannot read source file");
                issues.push(Issue::from_error(&rel, &err));
            }
        }
    }
    let mut summary = QualitySummary {
        files: files.len(),
        ..QualitySummary::default()
    };
    for f in &files {
        summary.lines += f.metrics.lines;
        summary.functions += f.metrics.functions;
        summary.goroutines += f.metrics.goroutines;
        summary.channels += f.metrics.channels;
        summary.mutexes += f.metrics.mutexes;
        summary.leak_hints += f.metrics.leak_hints.len();
    }
    debug!(analyzer = analyzer.name(), files = summary.files, "analyzed sources");
    Ok(QualityReport {
        analyzer: analyzer.name().to_string(),
        files,
        issues,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"package main

import (
    "os"
    "sync"
)

var mu sync.Mutex

func worker(ch chan int) (int, error) {
    return 0, nil
}

func main() {
    ch := make(chan int)
    go worker(ch)
    f, err := os.Open("x")
    if err != nil {
        return
    }
    _ = f
}
"#;

    #[test]
    fn test_go_analyzer_counts_patterns() {
        let m = GoHeuristicAnalyzer.analyze(SAMPLE);
        assert_eq!(m.functions, 2);
        assert_eq!(m.goroutines, 1);
        assert_eq!(m.channels, 1);
        assert_eq!(m.mutexes, 1);
        assert!(m.error_handling.has_error_returns);
        assert!(m.error_handling.has_error_checks);
        assert!(!m.error_handling.has_panic_recovery);
        assert_eq!(m.error_handling.score, 2);
        assert_eq!(m.leak_hints.len(), 2);
    }

    #[test]
    fn test_recover_and_cancellation_clear_hints() {
        let src = "func run(ctx context.Context) {\n  ctx, cancel := context.WithCancel(ctx)\n  defer cancel()\n  defer func() { if r := recover(); r != nil {} }()\n  go loop(ctx)\n}\n";
        let m = GoHeuristicAnalyzer.analyze(src);
        assert!(m.error_handling.has_panic_recovery);
        assert!(m.leak_hints.is_empty());
    }

    struct LineCounter;

    impl CodeQualityAnalyzer for LineCounter {
        fn name(&self) -> &'static str {
            "lines"
        }
        fn analyze(&self, source: &str) -> CodeMetrics {
            CodeMetrics {
                lines: source.lines().count(),
                ..CodeMetrics::default()
            }
        }
    }

    #[test]
    fn test_analyze_tree_uses_given_analyzer_and_skips_hidden() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("01-Examples")).unwrap();
        fs::create_dir_all(root.join(".cache")).unwrap();
        fs::write(root.join("01-Examples/a.go"), "a\nb\n").unwrap();
        fs::write(root.join("b.go"), "a\n").unwrap();
        fs::write(root.join(".cache/c.go"), "a\n").unwrap();
        fs::write(root.join("notes.md"), "a\n").unwrap();

        let report = analyze_tree(root, &LineCounter, &["go".to_string()]).unwrap();
        assert_eq!(report.analyzer, "lines");
        let names: Vec<&str> = report.files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(names, vec!["01-Examples/a.go", "b.go"]);
        assert_eq!(report.summary.lines, 3);
    }
}
