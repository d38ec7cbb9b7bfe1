//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docmaint",
    version,
    about = "Maintenance passes for numbered markdown documentation trees",
    long_about = "docmaint — validate and normalise NN-Name-Format naming, verify and repair internal markdown links, and regenerate navigation indexes.\n\nConfiguration precedence: CLI > docmaint.toml > defaults.",
    after_help = "Examples:\n  docmaint validate-naming docs/refactor\n  docmaint verify-links --output json\n  docmaint fix-naming docs/refactor\n  docmaint fix-links --dry-run\n  docmaint toc --max-depth 3",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Debug, Default)]
/// Options shared by every tree command.
pub struct TreeArgs {
    #[arg(help = "Docs root (default: from docmaint.toml, else docs/refactor)")]
    pub path: Option<String>,
    #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current docmaint version.")]
    Version,
    /// Report naming convention violations
    #[command(
        about = "Validate directory and file naming",
        long_about = "Report every directory and markdown file whose name does not match NN-Name-Format(.md). README.md is exempt. Exits 1 when any issue is found.",
        after_help = "Examples:\n  docmaint validate-naming docs/refactor"
    )]
    ValidateNaming {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Report broken internal links
    #[command(
        about = "Verify internal markdown links",
        long_about = "Resolve every local [text](target) link against the files under the docs root. External and fragment-only links are skipped. Exits 1 when any link is broken.",
        after_help = "Examples:\n  docmaint verify-links\n  docmaint verify-links docs/refactor --output json"
    )]
    VerifyLinks {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Rename loosely numbered entries
    #[command(
        about = "Normalise naming in place",
        long_about = "Rename entries shaped like <digits>-<rest> to NN-Name-Format. Names without a numeric prefix are reported and left unchanged."
    )]
    FixNaming {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Repair broken links by unique file name
    #[command(
        about = "Repair broken internal links",
        long_about = "Rewrite broken relative links whose file name matches exactly one file under the docs root. Ambiguous links are reported and left unchanged.",
        after_help = "Examples:\n  docmaint fix-links --dry-run"
    )]
    FixLinks {
        #[command(flatten)]
        tree: TreeArgs,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Report planned rewrites without changing files")]
        dry_run: bool,
    },
    /// Regenerate the table of contents and progress report
    #[command(
        about = "Generate TOC and progress report",
        long_about = "Write a nested markdown table of contents and a progress report (empty directories, directories without markdown) under the docs root."
    )]
    Toc {
        #[command(flatten)]
        tree: TreeArgs,
        #[arg(long, help = "Maximum directory depth to index (default: 4)")]
        max_depth: Option<usize>,
    },
    /// Heuristic metrics for embedded source samples
    #[command(
        about = "Analyze embedded code samples",
        long_about = "Count functions, goroutines, channels and mutexes and score error handling in source samples using regex heuristics. Informational only."
    )]
    AnalyzeCode {
        #[command(flatten)]
        tree: TreeArgs,
    },
    /// Run fix-naming then fix-links
    #[command(
        about = "Run all maintenance passes",
        long_about = "Normalise naming, re-scan the tree, then repair links. Exits 1 when any pass leaves failures behind."
    )]
    Maintain {
        #[command(flatten)]
        tree: TreeArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_path_and_flags() {
        let cli = Cli::try_parse_from(["docmaint", "-v", "fix-links", "docs", "--dry-run"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.cmd {
            Commands::FixLinks { tree, dry_run } => {
                assert_eq!(tree.path.as_deref(), Some("docs"));
                assert!(dry_run);
            }
            _ => panic!("expected fix-links"),
        }
    }

    #[test]
    fn test_path_is_optional() {
        let cli = Cli::try_parse_from(["docmaint", "verify-links", "--output", "json"]).unwrap();
        match cli.cmd {
            Commands::VerifyLinks { tree } => {
                assert!(tree.path.is_none());
                assert_eq!(tree.output.as_deref(), Some("json"));
            }
            _ => panic!("expected verify-links"),
        }
    }
}
