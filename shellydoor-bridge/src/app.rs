use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use shellydoor_core::GarageDoorOpener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::*;
use crate::services::HostService;

pub fn create_app(accessory: Arc<GarageDoorOpener>, host: Arc<HostService>) -> Router {
    let accessory_routes = Router::new()
        .route("/", get(get_accessory))
        .route("/identify", post(identify_accessory))
        .with_state(AccessoryState {
            accessory: accessory.clone(),
        });

    let door = Router::new()
        .route("/", get(get_door))
        .route("/target", put(set_door_target))
        .route("/refresh", post(refresh_door))
        .route("/events", get(sse_handler))
        .with_state(DoorHandleState {
            accessory: accessory.clone(),
            host: host.clone(),
        });

    Router::new()
        .nest("/accessory", accessory_routes)
        .nest("/door", door)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
