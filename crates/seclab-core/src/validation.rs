// SPDX-License-Identifier: Apache-2.0

//! Input validators for account fields.
//!
//! All functions are pure and total: they never panic and never touch I/O.

use regex::Regex;
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username regex is valid"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 30;
const EMAIL_MAX: usize = 254;
const PASSWORD_MIN: usize = 8;

/// Returns true for 3 to 30 ASCII letters, digits or underscores.
#[must_use]
pub fn is_valid_username(s: &str) -> bool {
    USERNAME_RE.is_match(s) && (USERNAME_MIN..=USERNAME_MAX).contains(&s.len())
}

/// Returns true for a `local@domain.tld` shaped address of at most 254 bytes.
#[must_use]
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s) && s.len() <= EMAIL_MAX
}

/// Returns true when the password has at least 8 characters, a letter and a digit.
#[must_use]
pub fn is_strong_password(s: &str) -> bool {
    s.chars().count() >= PASSWORD_MIN
        && s.chars().any(|c| c.is_ascii_alphabetic())
        && s.chars().any(|c| c.is_ascii_digit())
}

/// Lower-cases and trims an email address.
#[must_use]
pub fn normalize_email(s: &str) -> String {
    s.to_lowercase().trim().to_string()
}

/// Replaces `& < > " '` with HTML entities so text cannot be read as markup.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
