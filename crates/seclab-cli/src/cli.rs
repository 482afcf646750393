// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for `seclab-scan`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use seclab_core::security::RESULTS_FILE_NAME;

/// Output format for scan results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors (default)
    #[default]
    Text,
    /// JSON output for programmatic consumption
    Json,
}

/// Scan a source file for SQL injection, weak hashing, path traversal and
/// XSS patterns.
///
/// Exits 0 when nothing is found, 1 when at least one vulnerability category
/// is found and 2 when the file cannot be scanned.
#[derive(Parser, Debug)]
#[command(name = "seclab-scan", version, about)]
pub struct Cli {
    /// Source file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Where to write the results artifact
    #[arg(long, value_name = "PATH", default_value = RESULTS_FILE_NAME)]
    pub results: PathBuf,

    /// Skip writing the results artifact
    #[arg(long, conflicts_with = "results")]
    pub no_results: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}
