// SPDX-License-Identifier: Apache-2.0

//! Static pattern scanner used as a CI gate.
//!
//! Matches an embedded set of regex patterns line by line against one source
//! file. Covers SQL injection, weak password hashing, path traversal and XSS
//! in both the JavaScript and Rust shapes of the lab application. This is an
//! approximation: there is no parsing and no data-flow analysis.

pub mod patterns;
pub mod report;
pub mod scanner;
pub mod types;

pub use patterns::PatternEngine;
pub use report::{RESULTS_FILE_NAME, ScanReport, Verdict};
pub use scanner::SecurityScanner;
pub use types::{Advisory, AdvisoryKind, Category, Finding, PatternDefinition, Severity};
