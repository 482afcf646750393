// SPDX-License-Identifier: Apache-2.0

//! Output rendering for scan results.
//!
//! The scan returns data; this module handles presentation on stdout.

use std::fmt::Write;

use console::style;
use seclab_core::security::{Advisory, Category, Finding, ScanReport, Verdict};
use serde::Serialize;

use crate::cli::OutputFormat;

/// JSON shape of a scan result.
#[derive(Serialize)]
struct ReportOutput<'a> {
    file: &'a str,
    verdict: Verdict,
    categories: Vec<Category>,
    findings: &'a [Finding],
    advisories: &'a [Advisory],
}

/// Renders the report in the requested format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Text => print!("{}", render_text(report)),
    }
    Ok(())
}

fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportOutput {
        file: &report.file_path,
        verdict: report.verdict(),
        categories: report.categories_found(),
        findings: &report.findings,
        advisories: &report.advisories,
    })
}

fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}\n", style("Scanning").bold(), report.file_path);

    for category in Category::ALL {
        let hits: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.category == category)
            .collect();
        let Some(first) = hits.first() else {
            let _ = writeln!(out, "  {} {}", style("ok").green(), style(category.id()).dim());
            continue;
        };

        let _ = writeln!(
            out,
            "  {} {} ({} match{})",
            style("!!").red().bold(),
            category.detected_message(),
            hits.len(),
            if hits.len() == 1 { "" } else { "es" }
        );
        for finding in &hits {
            let _ = writeln!(
                out,
                "     {} {}",
                style(format!("line {:>4}", finding.line_number)).dim(),
                finding.matched_text
            );
        }
        if let Some(cwe) = &first.cwe {
            let _ = writeln!(out, "     {}", style(cwe).dim());
        }
    }

    if !report.advisories.is_empty() {
        out.push('\n');
        for advisory in &report.advisories {
            let _ = writeln!(out, "  {} {}", style("warning:").yellow(), advisory.message);
        }
    }

    out.push('\n');
    let verdict = match report.verdict() {
        Verdict::Passed => style("PASSED: No vulnerabilities detected".to_string()).green(),
        Verdict::Failed { count } => {
            style(format!("FAILED: {count} vulnerabilities found")).red()
        }
    };
    let _ = writeln!(out, "{}", verdict.bold());
    out
}
