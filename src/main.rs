
mod config;
mod error;
mod model;
mod sheets;
mod web;

#[cfg(test)]
mod _dev_utils;

pub use self::error::{Error, Result};

use crate::config::Config;
use crate::model::ModelManager;
use crate::sheets::{ServiceAccountKey, SheetsClient, SHEETS_BASE_URL};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load_from_env()?;
    info!("{:<12} - credentials from {:?}", "STARTUP", config.CREDENTIALS);

    let key = ServiceAccountKey::load(&config.CREDENTIALS)?;
    let sheets = SheetsClient::new(
        key,
        config.SPREADSHEET_ID.clone(),
        SHEETS_BASE_URL.to_string(),
        config.SHEETS_TIMEOUT,
    )?;
    let mm = ModelManager::new(Arc::new(sheets), config.SHEET_RANGE.clone());

    let routes_all = web::routes_all(mm, &config.WEB_FOLDER);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.PORT));
    info!("{:<12} - {addr}", "LISTENING");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, routes_all)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{:<12} - server stopped", "SHUTDOWN");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("{:<12} - unable to listen for Ctrl+C: {e}", "SHUTDOWN");
            std::future::pending::<()>().await;
        }
        info!("{:<12} - received Ctrl+C", "SHUTDOWN");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("{:<12} - received terminate signal", "SHUTDOWN");
            }
            Err(e) => {
                tracing::warn!("{:<12} - unable to listen for SIGTERM: {e}", "SHUTDOWN");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
