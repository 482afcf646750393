// SPDX-License-Identifier: Apache-2.0

//! Password hashing and verification.
//!
//! Stored credentials are `salt:derived_key`, both hex-encoded. The salt is
//! 16 bytes from the OS CSPRNG and the key is PBKDF2-HMAC-SHA256 with
//! 10 000 iterations and a 64-byte output.

use std::fmt;

use rand::RngCore;
use sha2::Sha256;

/// Salt byte length before hex encoding.
const SALT_BYTES: usize = 16;

/// Derived key byte length before hex encoding.
const KEY_BYTES: usize = 64;

/// PBKDF2 iteration count.
const ITERATIONS: u32 = 10_000;

/// Separator between the salt and the derived key.
pub const SEPARATOR: char = ':';

/// Salt used for the throwaway derivation on unknown usernames.
const DUMMY_SALT: &str = "00000000000000000000000000000000";

/// A parsed secure credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    salt: String,
    derived_key: String,
}

impl Credential {
    /// Derives a new credential for `password` with a fresh random salt.
    #[must_use]
    pub fn generate(password: &str) -> Self {
        let salt = generate_salt();
        let derived_key = derive_key(password, &salt);
        Self { salt, derived_key }
    }

    /// Parses a stored `salt:key` string.
    ///
    /// Returns `None` when the separator is missing or either half is empty.
    #[must_use]
    pub fn parse(stored: &str) -> Option<Self> {
        let (salt, derived_key) = stored.split_once(SEPARATOR)?;
        if salt.is_empty() || derived_key.is_empty() {
            return None;
        }
        Some(Self {
            salt: salt.to_string(),
            derived_key: derived_key.to_string(),
        })
    }

    /// Hex-encoded salt.
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Hex-encoded derived key.
    #[must_use]
    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }

    /// Checks `password` against this credential in constant time.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        let attempt = derive_key(password, &self.salt);
        constant_time_eq(attempt.as_bytes(), self.derived_key.as_bytes())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.salt, self.derived_key)
    }
}

/// Hashes a plaintext password into a storable credential string.
#[must_use]
pub fn hash_password(password: &str) -> String {
    Credential::generate(password).to_string()
}

/// Verifies a plaintext password against a stored credential string.
///
/// Malformed stored values fail closed.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    match Credential::parse(stored) {
        Some(credential) => credential.matches(password),
        None => {
            tracing::warn!("Stored credential is malformed, rejecting login");
            false
        }
    }
}

/// Runs one derivation and discards it, so an unknown username costs the
/// same as a wrong password.
pub fn burn_verification(password: &str) {
    let _ = derive_key(password, DUMMY_SALT);
}

fn generate_salt() -> String {
    let mut bytes = [0u8; SALT_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn derive_key(password: &str, salt: &str) -> String {
    let mut key = [0u8; KEY_BYTES];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), ITERATIONS, &mut key);
    hex::encode(key)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_succeeds() {
        let stored = hash_password("password1");
        assert!(verify_password("password1", &stored));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let stored = hash_password("password1");
        assert!(!verify_password("password2", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("hunter22");
        let b = hash_password("hunter22");
        assert_ne!(a, b);
        assert!(verify_password("hunter22", &a));
        assert!(verify_password("hunter22", &b));
    }

    #[test]
    fn stored_format_is_salt_separator_key() {
        let stored = hash_password("abc12345");
        let credential = Credential::parse(&stored).unwrap();
        assert_eq!(credential.salt().len(), SALT_BYTES * 2);
        assert_eq!(credential.derived_key().len(), KEY_BYTES * 2);
        assert!(credential.salt().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(credential.to_string(), stored);
    }

    #[test]
    fn derivation_is_deterministic_for_fixed_salt() {
        let k1 = derive_key("password1", "fixed_salt");
        let k2 = derive_key("password1", "fixed_salt");
        let k3 = derive_key("password1", "other_salt");
        assert_eq!(k1, k2);
        assert_ne!(k1, k3);
    }

    #[test]
    fn malformed_credentials_fail_closed() {
        assert!(!verify_password("admin123", "no-separator-here"));
        assert!(!verify_password("admin123", ":onlykey"));
        assert!(!verify_password("admin123", "onlysalt:"));
        assert!(!verify_password("admin123", ""));
        // Legacy unsalted digest of "admin123"
        assert!(!verify_password(
            "admin123",
            "0192023a7bbd73250516f069df18b500"
        ));
    }

    #[test]
    fn truncated_key_is_rejected() {
        let stored = hash_password("password1");
        let truncated = &stored[..stored.len() - 2];
        assert!(!verify_password("password1", truncated));
    }

    #[test]
    fn constant_time_eq_compares_every_byte() {
        let key = [0x5au8; 64];
        let mut last_differs = key;
        last_differs[63] ^= 0x01;

        assert!(constant_time_eq(&key, &key));
        assert!(!constant_time_eq(&key, &last_differs));
        assert!(!constant_time_eq(&key, &key[..63]));
        assert!(constant_time_eq(b"", b""));
        assert!(!constant_time_eq(b"", &key));
    }
}
