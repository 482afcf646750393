// SPDX-License-Identifier: Apache-2.0

//! Test fixture: the lab application with the fixes applied.
//!
//! This file should NOT trigger any security findings. It is never compiled.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method};
use axum::Json;
use tower_http::cors::CorsLayer;

/// Salted, iterated password hash.
fn hash_password(password: &str) -> String {
    let salt = random_salt();
    let mut key = [0u8; 64];
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password.as_bytes(), salt.as_bytes(), 10_000, &mut key);
    format!("{salt}:{}", hex::encode(key))
}

/// Login with a parameter-bound lookup.
async fn login(State(db): State<Db>, Json(req): Json<LoginRequest>) -> Json<Value> {
    let row = db.query_row(
        "SELECT id, password FROM users WHERE username = ?1",
        params![req.username],
        map_user,
    );
    let ok = row.is_ok_and(|user| verify_password(&req.password, &user.password));
    Json(json!({ "success": ok }))
}

/// Registration with validation and a fixed message.
async fn register(State(db): State<Db>, Json(req): Json<RegisterRequest>) -> Json<Value> {
    if !is_valid_username(&req.username) || !is_valid_email(&req.email) {
        return Json(json!({ "error": "Invalid input" }));
    }
    let stored = hash_password(&req.password);
    db.execute(
        "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
        params![escape_html(&req.username), normalize_email(&req.email), stored],
    );
    Json(json!({
        "success": true,
        "message": "Registration successful! Welcome to the platform."
    }))
}

/// Download through the resolver, which keeps only the final segment.
async fn download(Path(requested): Path<String>) -> Result<Vec<u8>, Rejection> {
    let resolved = resolve(&requested, BASE_DIR, &ALLOWED)?;
    Ok(tokio::fs::read(resolved).await.unwrap_or_default())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:3000"))
        .allow_methods([Method::GET, Method::POST])
}
