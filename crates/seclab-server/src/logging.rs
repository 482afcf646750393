// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the SecLab server.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging on stderr.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: info for seclab crates, warn for request tracing
//! cargo run -p seclab-server
//!
//! # Per-request spans
//! RUST_LOG=seclab=debug,tower_http=debug cargo run -p seclab-server
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "seclab=info,tower_http=warn";

/// Initialize the logging subsystem.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
