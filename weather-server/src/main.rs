//! Binary crate for the `cwa-weather` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and interactive configuration
//! - Logging setup
//! - HTTP routing and JSON rendering over `cwa-weather-core`

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod handlers;
mod routes;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
