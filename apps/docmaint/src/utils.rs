//! Supporting helpers: path normalisation and coloured message prefixes.

use owo_colors::OwoColorize;
use std::path::{Component, Path};

/// Whether stderr diagnostics should be coloured.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Whether human output should be coloured (`NO_COLOR` disables it).
pub fn use_colors(output: &str) -> bool {
    output != "json" && colors_enabled()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Render a relative path with `/` separators regardless of platform.
pub fn to_slash(rel: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::Normal(s) => parts.push(s.to_string_lossy().to_string()),
            Component::ParentDir => parts.push("..".to_string()),
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Lexically normalise a `/`-separated relative path.
///
/// Collapses `.` and empty segments and resolves `..` against preceding
/// segments. Returns `None` when the path climbs above its starting point.
pub fn lexical_normalize(path: &str) -> Option<String> {
    let mut out: Vec<&str> = Vec::new();
    for seg in path.split(|c| c == '/' || c == '\\') {
        match seg {
            "" | "." => {}
            ".." => {
                out.pop()?;
            }
            s => out.push(s),
        }
    }
    Some(out.join("/"))
}

/// Directory part of a `/`-separated relative path ("" for top-level files).
pub fn parent_of(rel: &str) -> &str {
    match rel.rfind('/') {
        Some(i) => &rel[..i],
        None => "",
    }
}

/// Final segment of a `/`-separated path.
pub fn file_name_of(rel: &str) -> &str {
    match rel.rfind('/') {
        Some(i) => &rel[i + 1..],
        None => rel,
    }
}

pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_lexical_normalize_handles_dots() {
        assert_eq!(lexical_normalize("a/../b/c.md").as_deref(), Some("b/c.md"));
        assert_eq!(lexical_normalize("./02-Next.md").as_deref(), Some("02-Next.md"));
        assert_eq!(lexical_normalize("a//b/./c").as_deref(), Some("a/b/c"));
        assert_eq!(lexical_normalize("../x.md"), None);
        assert_eq!(lexical_normalize("a/../../x.md"), None);
    }

    #[test]
    fn test_to_slash_and_segments() {
        let p: PathBuf = ["01-Intro", "02-Basics", "01-Start.md"].iter().collect();
        assert_eq!(to_slash(&p), "01-Intro/02-Basics/01-Start.md");
        assert_eq!(parent_of("a/b/c.md"), "a/b");
        assert_eq!(parent_of("c.md"), "");
        assert_eq!(file_name_of("a/b/c.md"), "c.md");
        assert!(is_hidden(".git"));
        assert!(!is_hidden("01-Intro"));
    }
}
