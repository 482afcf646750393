// SPDX-License-Identifier: Apache-2.0

//! Error types for SecLab.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Binaries should use `anyhow::Result` for top-level error handling.
//!
//! The variants follow the HTTP taxonomy the server exposes: each one maps to
//! exactly one status code, and only [`LabError::Store`], [`LabError::Config`]
//! and [`LabError::Io`] are server faults.

use thiserror::Error;

/// Errors that can occur during SecLab operations.
#[derive(Error, Debug)]
pub enum LabError {
    /// Missing or malformed input the caller can correct.
    #[error("{message}")]
    Validation {
        /// Client-safe description of the problem.
        message: String,
    },

    /// Username or password did not match a stored account.
    #[error("Invalid credentials")]
    Auth,

    /// A unique field (username or email) is already taken.
    #[error("{message}")]
    Conflict {
        /// Client-safe description of the conflict.
        message: String,
    },

    /// Backing store failure from `SQLite`.
    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Filesystem error outside the request path (directories, artifacts).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabError {
    /// Shorthand for a [`LabError::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        LabError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`LabError::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        LabError::Conflict {
            message: message.into(),
        }
    }

    /// Returns true when the error is caused by the server rather than the caller.
    #[must_use]
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            LabError::Store(_) | LabError::Config { .. } | LabError::Io(_)
        )
    }
}

impl From<config::ConfigError> for LabError {
    fn from(err: config::ConfigError) -> Self {
        LabError::Config {
            message: err.to_string(),
        }
    }
}
