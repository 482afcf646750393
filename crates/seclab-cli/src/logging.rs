// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for `seclab-scan`.
//!
//! Tracing goes to stderr so stdout stays clean for `--output json`.
//! Quiet by default; set `RUST_LOG=seclab=debug` to see every pattern match.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging subsystem.
pub fn init_logging() {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seclab=warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
