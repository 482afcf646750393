// SPDX-License-Identifier: Apache-2.0

//! Hardened HTTP service for the SecLab exercise.
//!
//! Exposes login, registration, confined file downloads and a health probe
//! over axum. All persistence and validation live in `seclab-core`; this
//! crate only maps requests onto it and errors back onto HTTP.

pub mod error;
pub mod handlers;
pub mod logging;
pub mod state;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post};
use seclab_core::{AppConfig, ResourceLocator, ServerConfig, UserStore};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// CORS restricted to the configured origins, GET and POST only.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Builds the application router with its middleware stack.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/api/login", post(handlers::login))
        .route("/api/register", post(handlers::register))
        .route("/api/download/", get(handlers::download_unnamed))
        .route("/api/download/{requested}", get(handlers::download))
        .with_state(state)
        .layer(build_cors_layer(&server.allowed_origins))
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Opens and initializes the store, then prepares the downloads directory.
///
/// This is the only startup routine; nothing is initialized at module load.
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = UserStore::open(&config.database.path).with_context(|| {
        format!(
            "Failed to open database at {}",
            config.database.path.display()
        )
    })?;
    store
        .initialize(&config.seed)
        .context("Failed to initialize database")?;
    tracing::info!(path = %config.database.path.display(), "Connected to SQLite database");

    let locator = ResourceLocator::new(
        config.downloads.dir.clone(),
        config.downloads.allowed_extensions.clone(),
    );
    locator.ensure_base_dir().with_context(|| {
        format!(
            "Failed to create downloads directory {}",
            config.downloads.dir.display()
        )
    })?;

    Ok(AppState::new(store, locator))
}

fn listen_addr(host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let addr = if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    };
    addr.parse()
        .with_context(|| format!("Invalid listen address {addr}"))
}

/// Runs the HTTP server until Ctrl+C.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;
    let router = create_router(state, &config.server);

    let addr = listen_addr(&config.server.host, config.server.port)?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Secure app listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}
