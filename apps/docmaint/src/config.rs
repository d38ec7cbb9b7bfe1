//! Configuration discovery and effective settings resolution.
//!
//! docmaint reads `docmaint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `root`: `docs/refactor` (relative to the repository root)
//! - `output`: `human`
//! - `naming.exempt`: none beyond `README.md`
//! - `toc.max_depth`: 4
//! - `toc.toc_file`: `navigation-index/TOC.md`
//! - `toc.progress_file`: `navigation-index/progress.md`
//! - `quality.extensions`: `["go"]`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_ROOT: &str = "docs/refactor";
pub const DEFAULT_TOC_FILE: &str = "navigation-index/TOC.md";
pub const DEFAULT_PROGRESS_FILE: &str = "navigation-index/progress.md";
pub const DEFAULT_MAX_DEPTH: usize = 4;

#[derive(Debug, Default, Deserialize, Clone)]
/// Naming section under `[naming]`.
pub struct NamingCfg {
    #[serde(default)]
    pub exempt: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Index generation section under `[toc]`.
pub struct TocCfg {
    /// Subdirectory of the docs root to index (defaults to the root itself).
    pub root: Option<String>,
    pub max_depth: Option<usize>,
    pub toc_file: Option<String>,
    pub progress_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Source analysis section under `[quality]`.
pub struct QualityCfg {
    pub extensions: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `docmaint.toml|yaml`.
pub struct DocmaintConfig {
    pub root: Option<String>,
    pub output: Option<String>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub naming: Option<NamingCfg>,
    #[serde(default)]
    pub toc: Option<TocCfg>,
    #[serde(default)]
    pub quality: Option<QualityCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub docs_root: PathBuf,
    pub output: String,
    pub log_level: Option<String>,
    pub naming_exempt: Vec<String>,
    pub toc_root: PathBuf,
    pub toc_max_depth: usize,
    pub toc_file: String,
    pub progress_file: String,
    pub quality_extensions: Vec<String>,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `docmaint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("docmaint.toml").exists()
            || cur.join("docmaint.yaml").exists()
            || cur.join("docmaint.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file that `load_config` would read, if any.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    ["docmaint.toml", "docmaint.yaml", "docmaint.yml"]
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

/// Load `DocmaintConfig` from `docmaint.toml` or `docmaint.yaml|yml` if present.
///
/// A file that fails to parse is reported through the log and ignored.
pub fn load_config(root: &Path) -> Option<DocmaintConfig> {
    let toml_path = root.join("docmaint.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return match toml::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                warn!(file = %toml_path.display(), error = %e, "ignoring invalid config");
                None
            }
        };
    }
    for yml in ["docmaint.yaml", "docmaint.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return match serde_yaml::from_str(&s) {
                Ok(cfg) => Some(cfg),
                Err(e) => {
                    warn!(file = %p.display(), error = %e, "ignoring invalid config");
                    None
                }
            };
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `cli_path` is taken as given (relative to the working directory); the
/// configured `root` is relative to the detected repository root.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_path: Option<&str>,
    cli_output: Option<&str>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let docs_root = match cli_path {
        Some(p) => PathBuf::from(p),
        None => repo_root.join(cfg.root.as_deref().unwrap_or(DEFAULT_ROOT)),
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let naming_exempt = cfg.naming.map(|n| n.exempt).unwrap_or_default();

    let toc = cfg.toc.unwrap_or_default();
    let toc_root = match toc.root.as_deref() {
        Some(sub) => docs_root.join(sub),
        None => docs_root.clone(),
    };

    let quality_extensions = cfg
        .quality
        .and_then(|q| q.extensions)
        .unwrap_or_else(|| vec!["go".to_string()]);

    Effective {
        repo_root,
        docs_root,
        output,
        log_level: cfg.log_level,
        naming_exempt,
        toc_root,
        toc_max_depth: toc.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
        toc_file: toc
            .toc_file
            .unwrap_or_else(|| DEFAULT_TOC_FILE.to_string()),
        progress_file: toc
            .progress_file
            .unwrap_or_else(|| DEFAULT_PROGRESS_FILE.to_string()),
        quality_extensions,
        config_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("docmaint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
root = "knowledge"
output = "json"
[naming]
exempt = ["CHANGELOG.md"]
[toc]
max_depth = 2
toc_file = "nav/TOC.md"
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None);
        assert!(eff.config_found);
        assert_eq!(eff.docs_root, root.join("knowledge"));
        assert_eq!(eff.output, "json");
        assert_eq!(eff.naming_exempt, vec!["CHANGELOG.md".to_string()]);
        assert_eq!(eff.toc_max_depth, 2);
        assert_eq!(eff.toc_file, "nav/TOC.md");
        assert_eq!(eff.progress_file, DEFAULT_PROGRESS_FILE);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("docmaint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
quality:
  extensions: ["go", "rs"]
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None);
        assert_eq!(eff.docs_root, root.join(DEFAULT_ROOT));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.toc_max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(eff.toc_root, eff.docs_root);
        assert_eq!(eff.quality_extensions, vec!["go", "rs"]);
    }

    #[test]
    fn test_cli_takes_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("docmaint.toml"), "root = \"a\"\noutput = \"json\"\n").unwrap();
        let eff = resolve_effective(root.to_str(), Some("other/docs"), Some("human"));
        assert_eq!(eff.docs_root, PathBuf::from("other/docs"));
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("docmaint.toml"), "root = [unclosed").unwrap();
        let eff = resolve_effective(root.to_str(), None, None);
        assert!(!eff.config_found);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.quality_extensions, vec!["go"]);
    }
}
