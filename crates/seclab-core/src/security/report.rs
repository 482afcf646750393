// SPDX-License-Identifier: Apache-2.0

//! Scan results, the pass/fail verdict and the CI results artifact.

use std::path::Path;

use serde::Serialize;

use crate::security::types::{Advisory, Category, Finding};

/// Default file name for the results artifact.
pub const RESULTS_FILE_NAME: &str = "security-test-results.txt";

/// Outcome of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Verdict {
    /// No vulnerability category was found.
    Passed,
    /// At least one category was found.
    Failed {
        /// Number of distinct categories found.
        count: usize,
    },
}

impl Verdict {
    /// Returns true for [`Verdict::Passed`].
    #[must_use]
    pub fn is_passed(self) -> bool {
        matches!(self, Verdict::Passed)
    }

    /// Process exit code for a CI gate: 0 on pass, 1 on failure.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        u8::from(!self.is_passed())
    }
}

/// Everything one scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Scanned file.
    pub file_path: String,
    /// Every pattern match, in line order.
    pub findings: Vec<Finding>,
    /// Informational observations.
    pub advisories: Vec<Advisory>,
}

impl ScanReport {
    /// Bundles scan output for `file_path`.
    #[must_use]
    pub fn new(file_path: &str, findings: Vec<Finding>, advisories: Vec<Advisory>) -> Self {
        Self {
            file_path: file_path.to_string(),
            findings,
            advisories,
        }
    }

    /// Distinct categories with at least one finding, in report order.
    #[must_use]
    pub fn categories_found(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.findings.iter().any(|f| f.category == *c))
            .collect()
    }

    /// Pass when no category was found.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.categories_found().len() {
            0 => Verdict::Passed,
            count => Verdict::Failed { count },
        }
    }

    /// Text written to the results artifact.
    #[must_use]
    pub fn results_artifact(&self) -> String {
        match self.verdict() {
            Verdict::Passed => "PASSED: No vulnerabilities detected".to_string(),
            Verdict::Failed { count } => {
                let lines: Vec<&str> = self
                    .categories_found()
                    .into_iter()
                    .map(Category::detected_message)
                    .collect();
                format!("FAILED: {count} vulnerabilities found\n{}", lines.join("\n"))
            }
        }
    }

    /// Writes [`ScanReport::results_artifact`] to `path`.
    ///
    /// # Errors
    ///
    /// Returns `LabError::Io` if the file cannot be written.
    pub fn write_results(&self, path: &Path) -> crate::Result<()> {
        std::fs::write(path, self.results_artifact())?;
        tracing::debug!(path = %path.display(), "Results artifact written");
        Ok(())
    }
}
