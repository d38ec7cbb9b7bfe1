//! docmaint CLI binary entry point.
//! Resolves configuration, runs the requested pass, and prints results.

use clap::Parser;
use docmaint::cli::{Cli, Commands, TreeArgs};
use docmaint::config::{self, Effective};
use docmaint::error::MaintError;
use docmaint::naming::NamingRule;
use docmaint::quality::GoHeuristicAnalyzer;
use docmaint::scan::FileSetSnapshot;
use docmaint::{links, logging, maintain, naming, output, toc, utils};

fn main() {
    let cli = Cli::parse();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::ValidateNaming { tree } => {
            let eff = prepare(&tree, cli.verbose);
            let rule = NamingRule::with_exempt(eff.naming_exempt.clone());
            match naming::validate_naming(&eff.docs_root, &rule) {
                Ok(report) => {
                    output::print_naming(&report, &eff.output);
                    report.exit_code()
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::VerifyLinks { tree } => {
            let eff = prepare(&tree, cli.verbose);
            match FileSetSnapshot::scan(&eff.docs_root) {
                Ok(snapshot) => {
                    let report = links::verify_links(&snapshot);
                    output::print_links(&report, &eff.output);
                    report.exit_code()
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::FixNaming { tree } => {
            let eff = prepare(&tree, cli.verbose);
            let rule = NamingRule::with_exempt(eff.naming_exempt.clone());
            match naming::fix_naming(&eff.docs_root, &rule) {
                Ok(report) => {
                    output::print_fix_naming(&report, &eff.output);
                    0
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::FixLinks { tree, dry_run } => {
            let eff = prepare(&tree, cli.verbose);
            match FileSetSnapshot::scan(&eff.docs_root) {
                Ok(snapshot) => {
                    let report = links::fix_links(&snapshot, dry_run);
                    output::print_fix_links(&report, &eff.output, dry_run);
                    0
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::Toc { tree, max_depth } => {
            let eff = prepare(&tree, cli.verbose);
            let depth = max_depth.unwrap_or(eff.toc_max_depth);
            match toc::write_toc(&eff.toc_root, &eff.toc_file, &eff.progress_file, depth) {
                Ok(outcome) => {
                    output::print_toc(&outcome, &eff.output);
                    0
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::AnalyzeCode { tree } => {
            let eff = prepare(&tree, cli.verbose);
            match docmaint::quality::analyze_tree(
                &eff.docs_root,
                &GoHeuristicAnalyzer,
                &eff.quality_extensions,
            ) {
                Ok(report) => {
                    output::print_quality(&report, &eff.output);
                    0
                }
                Err(e) => fatal(&e),
            }
        }
        Commands::Maintain { tree } => {
            let eff = prepare(&tree, cli.verbose);
            let rule = NamingRule::with_exempt(eff.naming_exempt.clone());
            match maintain::run_maintenance(&eff.docs_root, &rule) {
                Ok(report) => {
                    output::print_maintain(&report, &eff.output);
                    report.exit_code()
                }
                Err(e) => fatal(&e),
            }
        }
    };
    std::process::exit(code);
}

/// Resolve configuration and install logging for a tree command.
fn prepare(tree: &TreeArgs, verbose: u8) -> Effective {
    let eff = config::resolve_effective(
        tree.repo_root.as_deref(),
        tree.path.as_deref(),
        tree.output.as_deref(),
    );
    let level = logging::level_for(verbose, eff.log_level.as_deref());
    logging::init(&level, utils::use_colors(&eff.output));
    match config::config_path(&eff.repo_root) {
        Some(p) if !eff.config_found => {
            tracing::warn!(file = %p.display(), "config could not be parsed; using defaults")
        }
        Some(p) => tracing::debug!(file = %p.display(), "loaded config"),
        None => tracing::debug!("no docmaint config found; using defaults"),
    }
    tracing::info!(root = %eff.docs_root.display(), "docs root");
    eff
}

/// Report a run-level failure and return the exit code for it.
fn fatal(e: &MaintError) -> i32 {
    eprintln!("{} {}", utils::error_prefix(), e);
    2
}
