//! Listener setup and graceful shutdown.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use cwa_weather_core::{Config, ForecastService, config::ENV_API_KEY};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::routes;

/// Bind `0.0.0.0:<port>` and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    if config.has_api_key() {
        info!(upstream = %config.forecast_url(), "forecast API key configured");
    } else {
        warn!("{ENV_API_KEY} is not set; /api/weather will answer 500 until it is");
    }

    let service = ForecastService::from_config(config).context("Failed to build forecast client")?;
    let app = routes::create_router(Arc::new(service));

    let listener =
        TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "cwa-weather listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("cwa-weather stopped");
    Ok(())
}

/// Resolves on the first of SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    info!("shutdown signal received, draining connections");
}
