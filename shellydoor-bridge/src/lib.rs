use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use shellydoor_core::GarageDoorOpener;
use tokio::net::TcpListener;
use tokio::signal;

use crate::app::create_app;
use crate::configs::Settings;
use crate::errors::BridgeError;
use crate::services::HostService;

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod services;

/// Starts the accessory and serves its HTTP API until Ctrl+C.
pub async fn run(settings: &Arc<Settings>) -> Result<(), BridgeError> {
    let host = Arc::new(HostService::new());
    let accessory = Arc::new(GarageDoorOpener::new(settings.accessory.clone(), host.clone())?);

    accessory.start().await;

    let app = create_app(accessory.clone(), host);

    let ip_addr = settings.server.host.parse::<IpAddr>()?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("{} listening on {:?}", accessory.name(), address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    accessory.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => tracing::error!("Unable to listen for shutdown signal: {}", e),
    }
}
