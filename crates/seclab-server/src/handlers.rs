// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers.
//!
//! Store lookups, PBKDF2 derivations and download resolution all block, so
//! each runs on the blocking pool and the handler awaits the result before
//! answering.

use axum::Json;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use seclab_core::{Rejection, User, accounts};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>SecLab</title></head>
<body>
  <h1>DevSecOps Secure Application</h1>
  <p>This app has been secured against common vulnerabilities:</p>
  <ul>
    <li><strong>SQL Injection:</strong> parameter-bound queries</li>
    <li><strong>XSS:</strong> input validation and HTML escaping</li>
    <li><strong>Path Traversal:</strong> confined download resolution</li>
    <li><strong>Weak Crypto:</strong> salted PBKDF2-HMAC-SHA256</li>
  </ul>
  <h3>API Endpoints:</h3>
  <ul>
    <li>POST /api/login - Secure login with username/password</li>
    <li>POST /api/register - Secure user registration</li>
    <li>GET /api/download/{name} - Secure file downloads</li>
    <li>GET /health - Health check</li>
  </ul>
</body>
</html>
"#;

const LOGIN_SUCCESS: &str = "Login successful";
const REGISTER_SUCCESS: &str = "Registration successful! Welcome to the platform.";

/// Body of `POST /api/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    /// Account name.
    #[serde(default)]
    pub username: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of `POST /api/register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    /// Requested account name.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login or registration.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Always true.
    pub success: bool,
    /// Fixed confirmation message.
    pub message: &'static str,
    /// The authenticated or created account.
    pub user: User,
}

/// Liveness probe response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: &'static str,
    /// Current time, RFC 3339.
    pub timestamp: String,
}

/// `GET /`
pub async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(body) = payload?;
    let username = body.username.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let store = state.store.clone();
    let user = tokio::task::spawn_blocking(move || accounts::login(&store, &username, &password))
        .await
        .map_err(|err| ApiError::internal(&err, "Database error"))?
        .map_err(|err| ApiError::from_lab(err, "Database error"))?;

    Ok(Json(AccountResponse {
        success: true,
        message: LOGIN_SUCCESS,
        user,
    }))
}

/// `POST /api/register`
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Json(body) = payload?;
    let username = body.username.unwrap_or_default();
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let store = state.store.clone();
    let user = tokio::task::spawn_blocking(move || {
        accounts::register(&store, &username, &email, &password)
    })
    .await
    .map_err(|err| ApiError::internal(&err, "Registration failed"))?
    .map_err(|err| ApiError::from_lab(err, "Registration failed"))?;

    Ok(Json(AccountResponse {
        success: true,
        message: REGISTER_SUCCESS,
        user,
    }))
}

/// `GET /api/download/{requested}`
///
/// Only the final segment of the request is used. The response is always an
/// attachment so browsers never render it inline.
pub async fn download(
    State(state): State<AppState>,
    Path(requested): Path<String>,
) -> Result<Response, ApiError> {
    let locator = state.locator.clone();
    let lookup = requested.clone();
    let resolved = tokio::task::spawn_blocking(move || locator.resolve(&lookup))
        .await
        .map_err(|err| ApiError::internal(&err, "Download failed"))?
        .inspect_err(|rejection| {
            tracing::info!(requested = %requested, %rejection, "Download refused");
        })?;

    let bytes = tokio::fs::read(&resolved)
        .await
        .map_err(|err| ApiError::internal(&err, "Download failed"))?;

    let served_name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().replace(['"', '\\'], ""))
        .unwrap_or_default();
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{served_name}\""))
        .map_err(|err| ApiError::internal(&err, "Download failed"))?;
    let mime = mime_guess::from_path(&resolved).first_or_octet_stream();
    let content_type = HeaderValue::from_str(mime.as_ref())
        .unwrap_or(HeaderValue::from_static("application/octet-stream"));

    tracing::info!(served = %served_name, size = bytes.len(), "Download served");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(bytes),
    )
        .into_response())
}

/// `GET /api/download/` with nothing after the slash.
pub async fn download_unnamed() -> ApiError {
    ApiError::from(Rejection::EmptyName)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
