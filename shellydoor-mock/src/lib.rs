//! Simulated relay board with a garage door attached, for trying the bridge
//! without hardware.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::settings::Settings;
use crate::simulate::{GarageSimulator, Turn};

pub mod settings;
pub mod simulate;

#[derive(Debug, Deserialize)]
pub struct RelayQuery {
    pub turn: Option<Turn>,
}

/// Serves the device API on the configured address until the listener fails.
pub async fn run(settings: &Arc<Settings>) -> io::Result<()> {
    let travel_time = Duration::try_from_secs_f64(settings.door.travel_time)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let simulator = GarageSimulator::new(settings.door.initial, travel_time);
    let app = create_app(simulator);

    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    tracing::info!("listening on {:?}", address);

    axum::serve(listener, app).await
}

pub fn create_app(simulator: GarageSimulator) -> Router {
    // relay boards accept either method for the same action
    Router::new()
        .route("/relay/:index", get(relay_handler).post(relay_handler))
        .route("/status", get(status_handler).post(status_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(simulator)
}

async fn relay_handler(
    Path(index): Path<u8>,
    Query(query): Query<RelayQuery>,
    State(simulator): State<GarageSimulator>,
) -> Result<impl IntoResponse, StatusCode> {
    if index != 0 {
        return Err(StatusCode::NOT_FOUND);
    }

    let relay = match query.turn {
        Some(turn) => simulator.switch(turn).await,
        None => simulator.relay().await,
    };

    Ok(Json(relay))
}

async fn status_handler(State(simulator): State<GarageSimulator>) -> impl IntoResponse {
    Json(simulator.status().await)
}
