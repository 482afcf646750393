// SPDX-License-Identifier: Apache-2.0

//! Security pattern engine with regex-based vulnerability detection.

use crate::security::types::{Finding, PatternDefinition, truncate_evidence};
use regex::Regex;
use std::sync::LazyLock;

/// Embedded pattern database JSON.
const PATTERNS_JSON: &str = include_str!("patterns.json");

/// Compiled pattern engine (initialized once on first use).
static PATTERN_ENGINE: LazyLock<PatternEngine> = LazyLock::new(|| {
    PatternEngine::from_embedded_json()
        .expect("Failed to load embedded security patterns - patterns.json is malformed")
});

/// Pattern engine for security scanning.
#[derive(Debug)]
pub struct PatternEngine {
    patterns: Vec<CompiledPattern>,
}

#[derive(Debug)]
struct CompiledPattern {
    definition: PatternDefinition,
    regex: Regex,
}

impl CompiledPattern {
    fn applies_to(&self, file_ext: Option<&str>) -> bool {
        let filter = &self.definition.file_extensions;
        if filter.is_empty() {
            return true;
        }
        file_ext.is_some_and(|ext| filter.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
    }
}

impl PatternEngine {
    /// Creates a pattern engine from the embedded JSON patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or regex compilation fails.
    pub fn from_embedded_json() -> anyhow::Result<Self> {
        Self::from_json(PATTERNS_JSON)
    }

    /// Creates a pattern engine from a JSON array of pattern definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or regex compilation fails.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let definitions: Vec<PatternDefinition> = serde_json::from_str(json)?;
        let mut patterns = Vec::with_capacity(definitions.len());

        for def in definitions {
            let regex = Regex::new(&def.pattern)?;
            patterns.push(CompiledPattern {
                definition: def,
                regex,
            });
        }

        Ok(Self { patterns })
    }

    /// Gets the global pattern engine instance.
    #[must_use]
    pub fn global() -> &'static Self {
        &PATTERN_ENGINE
    }

    /// Returns true if some pattern filters on `ext` (e.g. `".js"`).
    fn claims_extension(&self, ext: &str) -> bool {
        self.patterns.iter().any(|p| {
            p.definition
                .file_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }

    /// Scans text content line by line.
    ///
    /// Each pattern contributes at most one finding per line. When some
    /// pattern claims the extension of `file_path`, patterns filtered to other
    /// extensions are skipped. A missing or unclaimed extension runs every
    /// pattern, so no file is passed unchecked.
    #[must_use]
    pub fn scan(&self, content: &str, file_path: &str) -> Vec<Finding> {
        let file_ext = std::path::Path::new(file_path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"));

        let claimed = file_ext
            .as_deref()
            .is_some_and(|ext| self.claims_extension(ext));
        if !claimed {
            tracing::debug!(file = %file_path, "Unrecognized extension, applying all patterns");
        }

        let active: Vec<&CompiledPattern> = self
            .patterns
            .iter()
            .filter(|p| !claimed || p.applies_to(file_ext.as_deref()))
            .collect();

        let mut findings = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            for compiled in &active {
                if let Some(mat) = compiled.regex.find(line) {
                    tracing::debug!(
                        pattern_id = %compiled.definition.id,
                        file = %file_path,
                        line = line_num + 1,
                        "Security pattern matched"
                    );

                    findings.push(Finding {
                        category: compiled.definition.category,
                        pattern_id: compiled.definition.id.clone(),
                        description: compiled.definition.description.clone(),
                        severity: compiled.definition.severity,
                        file_path: file_path.to_string(),
                        line_number: line_num + 1,
                        matched_text: truncate_evidence(mat.as_str()),
                        cwe: compiled.definition.cwe.clone(),
                    });
                }
            }
        }

        findings
    }

    /// Returns the number of loaded patterns.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
