// SPDX-License-Identifier: Apache-2.0

//! Login and registration flows.
//!
//! Both functions block on PBKDF2 and `SQLite`; async callers should run them
//! on a blocking thread.

use crate::Result;
use crate::credential::{burn_verification, hash_password, verify_password};
use crate::error::LabError;
use crate::store::{NewUser, User, UserStore};
use crate::validation::{
    escape_html, is_strong_password, is_valid_email, is_valid_username, normalize_email,
};

/// Authenticates `username` with `password`.
///
/// Empty fields are a validation error. Unknown usernames and wrong
/// passwords both return [`LabError::Auth`] after one key derivation.
pub fn login(store: &UserStore, username: &str, password: &str) -> Result<User> {
    if username.is_empty() || password.is_empty() {
        return Err(LabError::validation("Username and password required"));
    }

    let Some(record) = store.find_by_username(username)? else {
        burn_verification(password);
        tracing::info!(username, "Login failed: unknown user");
        return Err(LabError::Auth);
    };

    if !verify_password(password, &record.password) {
        tracing::info!(username, "Login failed: wrong password");
        return Err(LabError::Auth);
    }

    tracing::info!(username, user_id = record.id, "Login succeeded");
    Ok(record.into())
}

/// Creates a new non-admin account.
///
/// The stored username is HTML-escaped and the email normalized.
pub fn register(store: &UserStore, username: &str, email: &str, password: &str) -> Result<User> {
    if username.is_empty() || email.is_empty() || password.is_empty() {
        return Err(LabError::validation("All fields are required"));
    }
    if !is_valid_username(username) {
        return Err(LabError::validation(
            "Username must be 3-30 characters, alphanumeric and underscores only",
        ));
    }
    if !is_valid_email(email) {
        return Err(LabError::validation("Invalid email format"));
    }
    if !is_strong_password(password) {
        return Err(LabError::validation(
            "Password must be at least 8 characters with letters and numbers",
        ));
    }

    let user = store.insert_user(&NewUser {
        username: escape_html(username.trim()),
        email: normalize_email(email),
        password: hash_password(password),
        is_admin: false,
    })?;

    tracing::info!(username = %user.username, user_id = user.id, "Account registered");
    Ok(user)
}
