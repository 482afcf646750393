// SPDX-License-Identifier: Apache-2.0

//! `seclab-scan` - CI gate for the SecLab exercise.
//!
//! Scans one source file for known vulnerable patterns, prints the result,
//! writes the results artifact and exits non-zero when anything is found.

mod cli;
mod errors;
mod logging;
mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use seclab_core::security::{SecurityScanner, Verdict};
use tracing::debug;

use crate::cli::Cli;

/// Exit code when the file could not be scanned at all.
const EXIT_SCAN_ERROR: u8 = 2;

fn run(cli: &Cli) -> Result<Verdict> {
    let report = SecurityScanner::new()
        .scan_path(&cli.file)
        .with_context(|| format!("Failed to scan {}", cli.file.display()))?;

    output::render_report(&report, cli.output)?;

    if !cli.no_results {
        report
            .write_results(&cli.results)
            .with_context(|| format!("Failed to write {}", cli.results.display()))?;
        debug!(path = %cli.results.display(), "Results written");
    }

    Ok(report.verdict())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging();

    match run(&cli) {
        Ok(verdict) => ExitCode::from(verdict.exit_code()),
        Err(e) => {
            eprintln!("Error: {}", errors::format_error(&e));
            ExitCode::from(EXIT_SCAN_ERROR)
        }
    }
}
