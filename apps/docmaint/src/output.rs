//! Output rendering for validation reports and fix passes.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::maintain::MaintainReport;
use crate::models::fix::{FixNamingReport, LinkFixReport};
use crate::models::{Issue, Report};
use crate::quality::QualityReport;
use crate::toc::TocOutcome;
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} cannot serialize report: {}", crate::utils::error_prefix(), e),
    }
}

fn bold(s: &str, color: bool) -> String {
    if color {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

fn err_icon(color: bool) -> String {
    if color {
        "✖".red().to_string()
    } else {
        "✖".to_string()
    }
}

fn ok_line(msg: &str, color: bool) -> String {
    if color {
        format!("{} {}", "✔".green(), msg)
    } else {
        format!("✔ {}", msg)
    }
}

fn print_issue_line(is: &Issue, color: bool) {
    match is {
        Issue::Naming {
            path, description, ..
        } => println!("{} {} ❲naming❳ — {}", err_icon(color), bold(path, color), description),
        Issue::BrokenLink {
            source,
            text,
            target,
        } => println!(
            "{} {} ❲broken-link❳ — [{}]({})",
            err_icon(color),
            bold(source, color),
            text,
            target
        ),
        Issue::FileError { path, error, message } => println!(
            "{} {} ❲{}❳ — {}",
            err_icon(color),
            bold(path, color),
            error,
            message
        ),
        Issue::RenameFailed {
            from,
            to,
            error,
            message,
        } => println!(
            "{} {} -> {} ❲{}❳ — {}",
            err_icon(color),
            bold(from, color),
            to,
            error,
            message
        ),
    }
}

fn print_summary(text: String, color: bool) {
    if color {
        println!("{}", text.bold());
    } else {
        println!("{}", text);
    }
}

/// Print naming validation results in traversal order.
pub fn print_naming(res: &Report, output: &str) {
    if output == "json" {
        print_json(&compose_report_json(res));
        return;
    }
    let color = use_colors(output);
    if res.issues.is_empty() {
        println!("{}", ok_line("All directories and files follow the naming pattern.", color));
    }
    for is in &res.issues {
        print_issue_line(is, color);
    }
    print_summary(
        format!(
            "— Summary — issues={} checked={}",
            res.summary.issues, res.summary.files
        ),
        color,
    );
}

/// Print broken links grouped by source file.
pub fn print_links(res: &Report, output: &str) {
    if output == "json" {
        print_json(&compose_report_json(res));
        return;
    }
    let color = use_colors(output);
    let (broken, other): (Vec<&Issue>, Vec<&Issue>) = res
        .issues
        .iter()
        .partition(|i| matches!(i, Issue::BrokenLink { .. }));
    for is in &other {
        print_issue_line(is, color);
    }
    if broken.is_empty() {
        println!("{}", ok_line("No broken links found.", color));
    } else {
        let header = format!("Found {} broken links:", broken.len());
        if color {
            println!("{} {}", err_icon(color), header.red().bold());
        } else {
            println!("{} {}", err_icon(color), header);
        }
        let mut current: Option<&str> = None;
        for is in broken {
            if let Issue::BrokenLink {
                source,
                text,
                target,
            } = is
            {
                if current != Some(source.as_str()) {
                    println!("\nIn file: {}", bold(source, color));
                    current = Some(source.as_str());
                }
                println!("  - [{}]({})", text, target);
            }
        }
    }
    print_summary(
        format!(
            "— Summary — broken={} unreadable={} files={}",
            res.issues.len() - other.len(),
            other.len(),
            res.summary.files
        ),
        color,
    );
}

/// Print applied renames, unresolved names, and per-item failures.
pub fn print_fix_naming(res: &FixNamingReport, output: &str) {
    if output == "json" {
        print_json(&compose_fix_naming_json(res));
        return;
    }
    let color = use_colors(output);
    for r in &res.renames {
        if color {
            println!("{} {} -> {}", "✏️  renamed:".green().bold(), r.from, r.to.bold());
        } else {
            println!("✏️  renamed: {} -> {}", r.from, r.to);
        }
    }
    for is in &res.unresolved {
        if color {
            println!("{} {}", "⏭️  no fix (unnumbered):".yellow().bold(), is.file());
        } else {
            println!("⏭️  no fix (unnumbered): {}", is.file());
        }
    }
    for is in &res.failures {
        print_issue_line(is, color);
    }
    print_summary(
        format!(
            "— Summary — renamed={} unresolved={} failed={}",
            res.renames.len(),
            res.unresolved.len(),
            res.failures.len()
        ),
        color,
    );
}

/// Print link rewrites. In dry-run mode rewrites are shown as planned.
pub fn print_fix_links(res: &LinkFixReport, output: &str, dry_run: bool) {
    if output == "json" {
        print_json(&compose_fix_links_json(res, dry_run));
        return;
    }
    let color = use_colors(output);
    let label = if dry_run { "🔎 would fix:" } else { "🔗 fixed:" };
    for f in &res.fixes {
        if color {
            println!(
                "{} {} [{}]({}) -> [{}]({})",
                label.green().bold(),
                f.source.bold(),
                f.text,
                f.from,
                f.text,
                f.to
            );
        } else {
            println!("{} {} [{}]({}) -> [{}]({})", label, f.source, f.text, f.from, f.text, f.to);
        }
    }
    for is in res.unresolved.iter().chain(res.failures.iter()) {
        print_issue_line(is, color);
    }
    print_summary(
        format!(
            "— Summary — processed={} fixed={} written={} unresolved={} failed={}",
            res.files_processed,
            res.fixes.len(),
            res.files_written,
            res.unresolved.len(),
            res.failures.len()
        ),
        color,
    );
}

pub fn print_toc(res: &TocOutcome, output: &str) {
    if output == "json" {
        print_json(res);
        return;
    }
    let color = use_colors(output);
    println!("{}", ok_line(&format!("wrote TOC: {}", res.toc_file), color));
    println!("{}", ok_line(&format!("wrote progress: {}", res.progress_file), color));
    for is in &res.issues {
        print_issue_line(is, color);
    }
    print_summary(
        format!(
            "— Summary — entries={} empty_dirs={} no_markdown_dirs={} unreadable={}",
            res.entries,
            res.empty_dirs,
            res.no_markdown_dirs,
            res.issues.len()
        ),
        color,
    );
}

pub fn print_quality(res: &QualityReport, output: &str) {
    if output == "json" {
        print_json(res);
        return;
    }
    let color = use_colors(output);
    for f in &res.files {
        let m = &f.metrics;
        println!(
            "{} lines={} funcs={} goroutines={} channels={} mutexes={} error_score={}/3",
            bold(&f.file, color),
            m.lines,
            m.functions,
            m.goroutines,
            m.channels,
            m.mutexes,
            m.error_handling.score
        );
        for hint in &m.leak_hints {
            if color {
                println!("  {} {}", "▲".yellow(), hint);
            } else {
                println!("  ▲ {}", hint);
            }
        }
    }
    for is in &res.issues {
        print_issue_line(is, color);
    }
    let s = &res.summary;
    print_summary(
        format!(
            "— Summary — analyzer={} files={} lines={} funcs={} goroutines={} channels={} mutexes={} hints={}",
            res.analyzer, s.files, s.lines, s.functions, s.goroutines, s.channels, s.mutexes, s.leak_hints
        ),
        color,
    );
}

pub fn print_maintain(res: &MaintainReport, output: &str) {
    if output == "json" {
        print_json(&json!({
            "naming": compose_fix_naming_json(&res.naming),
            "links": compose_fix_links_json(&res.links, false),
            "summary": {"passed": res.passed(), "failed": res.failed()},
        }));
        return;
    }
    let color = use_colors(output);
    print_summary("== naming ==".to_string(), color);
    print_fix_naming(&res.naming, output);
    print_summary("== links ==".to_string(), color);
    print_fix_links(&res.links, output, false);
    print_summary(
        format!(
            "— Maintenance — passed={} failed={}",
            res.passed(),
            res.failed()
        ),
        color,
    );
}

/// Compose a validation report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(res: &Report) -> JsonVal {
    json!({
        "issues": res.issues,
        "summary": res.summary,
    })
}

pub fn compose_fix_naming_json(res: &FixNamingReport) -> JsonVal {
    json!({
        "renames": res.renames,
        "unresolved": res.unresolved,
        "failures": res.failures,
        "summary": {
            "renamed": res.renames.len(),
            "unresolved": res.unresolved.len(),
            "failed": res.failures.len(),
        },
    })
}

pub fn compose_fix_links_json(res: &LinkFixReport, dry_run: bool) -> JsonVal {
    json!({
        "dry_run": dry_run,
        "fixes": res.fixes,
        "unresolved": res.unresolved,
        "failures": res.failures,
        "summary": {
            "processed": res.files_processed,
            "fixed": res.fixes.len(),
            "written": res.files_written,
            "unresolved": res.unresolved.len(),
            "failed": res.failures.len(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fix::{LinkFix, Rename};
    use crate::models::EntryKind;

    #[test]
    fn test_compose_report_json_shape() {
        let res = Report::new(
            vec![Issue::BrokenLink {
                source: "01-Intro.md".into(),
                text: "see".into(),
                target: "./02-Next.md".into(),
            }],
            1,
        );
        let out = compose_report_json(&res);
        assert_eq!(out["summary"]["issues"], 1);
        assert_eq!(out["issues"][0]["kind"], "broken-link");
        assert_eq!(out["issues"][0]["target"], "./02-Next.md");
    }

    #[test]
    fn test_compose_fix_json_summaries() {
        let naming = FixNamingReport {
            renames: vec![Rename {
                from: "5-intro".into(),
                to: "05-Intro".into(),
                entry: EntryKind::Directory,
            }],
            unresolved: Vec::new(),
            failures: Vec::new(),
        };
        let out = compose_fix_naming_json(&naming);
        assert_eq!(out["summary"]["renamed"], 1);
        assert_eq!(out["renames"][0]["entry"], "directory");

        let links = LinkFixReport {
            fixes: vec![LinkFix {
                source: "a.md".into(),
                text: "t".into(),
                from: "b.md".into(),
                to: "x/b.md".into(),
            }],
            files_processed: 2,
            ..LinkFixReport::default()
        };
        let out = compose_fix_links_json(&links, true);
        assert_eq!(out["dry_run"], true);
        assert_eq!(out["summary"]["fixed"], 1);
        assert_eq!(out["summary"]["written"], 0);
        assert_eq!(out["fixes"][0]["to"], "x/b.md");
    }
}
