use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use shellydoor_core::GarageDoorOpener;

#[derive(Clone)]
pub struct AccessoryState {
    pub accessory: Arc<GarageDoorOpener>,
}

pub async fn get_accessory(State(state): State<AccessoryState>) -> impl IntoResponse {
    Json(state.accessory.information().clone())
}

pub async fn identify_accessory(State(state): State<AccessoryState>) -> impl IntoResponse {
    state.accessory.identify();

    StatusCode::NO_CONTENT
}
