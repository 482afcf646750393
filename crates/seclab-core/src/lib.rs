// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # SecLab Core
//!
//! Core library for the SecLab DevSecOps exercise: a small web application
//! shipped in a hardened form, plus a pattern scanner that flags the
//! vulnerable form of the same code in CI.
//!
//! This crate provides reusable components for:
//! - Salted, iterated password hashing and verification
//! - Pure input validators and HTML escaping
//! - Filename resolution confined to a downloads directory
//! - SQLite-backed user storage with parameter-bound queries
//! - Regex-based vulnerability scanning with a pass/fail verdict
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seclab_core::{hash_password, verify_password, SecurityScanner};
//!
//! let stored = hash_password("correct horse 1");
//! assert!(verify_password("correct horse 1", &stored));
//!
//! let report = SecurityScanner::new().scan_source("let q = 1;", "app.rs");
//! assert!(report.verdict().is_passed());
//! ```
//!
//! ## Modules
//!
//! - [`accounts`] - Login and registration flows over the store
//! - [`config`] - Configuration loading and paths
//! - [`credential`] - Password hashing and verification
//! - [`error`] - Error types
//! - [`locator`] - Safe download path resolution
//! - [`security`] - Vulnerability pattern scanner
//! - [`store`] - SQLite user store
//! - [`validation`] - Input validators

// ============================================================================
// Error Handling
// ============================================================================

pub use error::LabError;

/// Convenience Result type for SecLab operations.
///
/// This is equivalent to `std::result::Result<T, LabError>`.
pub type Result<T> = std::result::Result<T, LabError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, DatabaseConfig, DownloadsConfig, SeedConfig, ServerConfig, config_dir,
    config_file_path, load_config,
};

// ============================================================================
// Credentials and Validation
// ============================================================================

pub use credential::{Credential, hash_password, verify_password};
pub use validation::{
    escape_html, is_strong_password, is_valid_email, is_valid_username, normalize_email,
};

// ============================================================================
// Downloads
// ============================================================================

pub use locator::{Rejection, ResourceLocator, resolve};

// ============================================================================
// Accounts and Storage
// ============================================================================

pub use accounts::{login, register};
pub use store::{NewUser, Note, User, UserRecord, UserStore};

// ============================================================================
// Scanning
// ============================================================================

pub use security::{Advisory, Category, Finding, ScanReport, SecurityScanner, Verdict};

// ============================================================================
// Modules
// ============================================================================

pub mod accounts;
pub mod config;
pub mod credential;
pub mod error;
pub mod locator;
pub mod security;
pub mod store;
pub mod validation;
