// SPDX-License-Identifier: Apache-2.0

//! Test fixture: the lab application with every fix removed.
//!
//! This file SHOULD trigger findings in all four categories. It is never
//! compiled.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use tower_http::cors::CorsLayer;

/// Unsalted MD5 password digest.
fn hash_password(password: &str) -> String {
    let digest = md5::compute(password.as_bytes());
    format!("{digest:x}")
}

/// Login with the query assembled from request text.
async fn login(State(db): State<Db>, Json(req): Json<LoginRequest>) -> Json<Value> {
    let username = req.username;
    let hashed = hash_password(&req.password);
    let sql = format!("SELECT * FROM users WHERE username = '{username}' AND password = '{hashed}'");
    let user = db.query_row(&sql, [], map_user);
    Json(json!({ "success": user.is_ok() }))
}

/// Registration that echoes the raw username back.
async fn register(State(db): State<Db>, Json(req): Json<RegisterRequest>) -> Json<Value> {
    let username = req.username;
    let email = req.email;
    let hashed = hash_password(&req.password);
    db.execute(&format!(
        "INSERT INTO users (username, email, password) VALUES ('{username}', '{email}', '{hashed}')"
    ), []);
    let message = format!("Welcome {username}! Account created for {email}");
    Json(json!({ "success": true, "message": message }))
}

/// Download with the requested name joined straight onto the directory.
async fn download(Path(filename): Path<String>) -> Vec<u8> {
    let base = std::path::PathBuf::from("public/downloads");
    let path = base.join(&filename);
    std::fs::read(path).unwrap_or_default()
}

/// Greeting page that reflects the name into HTML.
async fn greet(Path(name): Path<String>) -> Html<String> {
    Html(format!("<h1>Hello {name}</h1>"))
}

fn cors() -> CorsLayer {
    CorsLayer::permissive()
}
