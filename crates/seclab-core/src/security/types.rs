// SPDX-License-Identifier: Apache-2.0

//! Security scan types and data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a matched snippet.
pub const EVIDENCE_MAX_CHARS: usize = 80;

/// Vulnerability category a pattern belongs to.
///
/// Variant order is the order categories are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Untrusted input interpolated into SQL text.
    SqlInjection,
    /// MD5 used for password storage.
    WeakHash,
    /// Untrusted filename joined onto a filesystem path.
    PathTraversal,
    /// Untrusted input reflected into a response unescaped.
    Xss,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 4] = [
        Category::SqlInjection,
        Category::WeakHash,
        Category::PathTraversal,
        Category::Xss,
    ];

    /// Stable identifier, as used in `patterns.json`.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Category::SqlInjection => "sql-injection",
            Category::WeakHash => "weak-hash",
            Category::PathTraversal => "path-traversal",
            Category::Xss => "xss",
        }
    }

    /// Line written to the results artifact when the category is found.
    #[must_use]
    pub fn detected_message(self) -> &'static str {
        match self {
            Category::SqlInjection => "SQL Injection vulnerability detected",
            Category::WeakHash => "Weak MD5 cryptography detected",
            Category::PathTraversal => "Path traversal vulnerability detected",
            Category::Xss => "XSS vulnerability detected",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Severity level of a security finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical security vulnerability requiring immediate attention.
    Critical,
    /// High severity issue that should be addressed soon.
    High,
    /// Medium severity issue.
    Medium,
    /// Low severity issue or informational finding.
    #[default]
    Low,
}

/// A single pattern match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Category of the matching pattern.
    pub category: Category,
    /// Pattern ID that matched.
    pub pattern_id: String,
    /// Human-readable description of the issue.
    pub description: String,
    /// Severity level.
    pub severity: Severity,
    /// File path where the finding was detected.
    pub file_path: String,
    /// Line number in the file (1-indexed).
    pub line_number: usize,
    /// The matched snippet, at most [`EVIDENCE_MAX_CHARS`] characters.
    pub matched_text: String,
    /// Optional CWE identifier (e.g., "CWE-89").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
}

/// Pattern definition for security scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Unique identifier for this pattern.
    pub id: String,
    /// Category this pattern reports under.
    pub category: Category,
    /// Human-readable description.
    pub description: String,
    /// Regex pattern to match.
    pub pattern: String,
    /// Severity level for matches.
    pub severity: Severity,
    /// Optional CWE identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
    /// File extensions to scan (empty = all files).
    #[serde(default)]
    pub file_extensions: Vec<String>,
}

/// Kind of informational observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisoryKind {
    /// CORS enabled for every origin.
    UnrestrictedCors,
    /// Many request fields used without a nearby validation call.
    DirectInput,
}

/// An observation that is reported but never affects the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// What was observed.
    pub kind: AdvisoryKind,
    /// Human-readable message.
    pub message: String,
    /// How many times it was observed.
    pub occurrences: usize,
}

/// Truncates a matched snippet to [`EVIDENCE_MAX_CHARS`] characters.
#[must_use]
pub fn truncate_evidence(text: &str) -> String {
    text.chars().take(EVIDENCE_MAX_CHARS).collect()
}
