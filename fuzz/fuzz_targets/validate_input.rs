// SPDX-License-Identifier: Apache-2.0
// SPDX-FileCopyrightText: 2026 SecLab Contributors

#![no_main]

use libfuzzer_sys::fuzz_target;
use seclab_core::{escape_html, is_strong_password, is_valid_email, is_valid_username};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if is_valid_username(s) {
            assert!(s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_'));
            assert_eq!(escape_html(s), s);
        }
        if is_valid_email(s) {
            assert!(s.len() <= 254);
        }
        let _ = is_strong_password(s);

        let escaped = escape_html(s);
        assert!(!escaped.contains(['<', '>', '"', '\'']));
    }
});
