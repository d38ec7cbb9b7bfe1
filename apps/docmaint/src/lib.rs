//! docmaint core library.
//!
//! This crate exposes programmatic APIs for keeping a numbered markdown
//! documentation tree consistent: naming validation and normalisation,
//! internal link verification and repair, and navigation index generation.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: Error taxonomy; only a missing root is fatal.
//! - `logging`: tracing subscriber setup.
//! - `scan`: Tree scanner producing the file-set snapshot.
//! - `naming`: `NN-Name-Format` validation and rename pass.
//! - `links`: Link extraction, verification, and repair.
//! - `toc`: Table of contents and progress report generation.
//! - `quality`: Heuristic metrics for embedded code samples.
//! - `maintain`: Sequential naming + link maintenance run.
//! - `models`: Report and fix-outcome data models.
//! - `output`: Human/JSON printers.
//! - `utils`: Supporting helpers.
//! - `walk`: Shared sorted directory walk with per-entry error capture.
pub mod cli;
pub mod config;
pub mod error;
pub mod links;
pub mod logging;
pub mod maintain;
pub mod models;
pub mod naming;
pub mod output;
pub mod quality;
pub mod scan;
pub mod toc;
pub mod utils;
pub mod walk;
