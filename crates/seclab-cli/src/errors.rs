// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `LabError` and appends a hint when the
//! scanned file could not be read.

use anyhow::Error;
use seclab_core::LabError;

/// Formats an error for CLI display with helpful hints.
///
/// Non-`LabError` errors are printed with their full context chain.
pub fn format_error(error: &Error) -> String {
    if let Some(LabError::Io(_)) = error.downcast_ref::<LabError>() {
        format!("{error:#}\n\nTip: Check that the file exists and is readable UTF-8 text.")
    } else {
        format!("{error:#}")
    }
}
