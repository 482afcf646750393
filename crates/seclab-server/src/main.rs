// SPDX-License-Identifier: Apache-2.0

//! Binary entry point for the SecLab server.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use seclab_core::load_config;
use seclab_server::logging;
use tracing::debug;

/// Hardened login, registration and download service.
#[derive(Parser, Debug)]
#[command(name = "seclab-server", version, about)]
struct Cli {
    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config and PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// SQLite database file (overrides config)
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Directory files are downloaded from (overrides config)
    #[arg(long, value_name = "DIR")]
    downloads: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let mut config = load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }
    if let Some(downloads) = cli.downloads {
        config.downloads.dir = downloads;
    }

    seclab_server::run(config).await
}
