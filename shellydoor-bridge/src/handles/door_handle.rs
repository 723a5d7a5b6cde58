use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use shellydoor_core::services::PollOutcome;
use shellydoor_core::{DoorState, GarageDoorOpener, StatusSample};
use time::OffsetDateTime;

use crate::errors::ApiError;
use crate::services::HostService;

#[derive(Clone)]
pub struct DoorHandleState {
    pub accessory: Arc<GarageDoorOpener>,
    pub host: Arc<HostService>,
}

/// Target request. Any integer parses so that unknown codes get a 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetBody {
    pub value: i64,
}

/// A door state with both its host code and its name.
#[derive(Debug, Clone, Serialize)]
pub struct StateValue {
    pub value: u8,
    pub name: &'static str,
}

impl From<DoorState> for StateValue {
    fn from(state: DoorState) -> Self {
        Self {
            value: state.code(),
            name: state.name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoorResponse {
    pub current: StateValue,
    pub target: StateValue,
    pub is_moving: bool,
    pub fault: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    pub skipped: bool,
    /// False when a move started while the status request was in flight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub sampled_at: Option<OffsetDateTime>,
}

impl RefreshResponse {
    fn skipped() -> Self {
        Self {
            skipped: true,
            applied: None,
            state: None,
            value: None,
            sampled_at: None,
        }
    }

    fn sampled(sample: StatusSample, applied: bool) -> Self {
        Self {
            skipped: false,
            applied: Some(applied),
            state: Some(sample.state.into()),
            value: sample.value,
            sampled_at: Some(sample.sampled_at),
        }
    }
}

pub async fn get_door(State(state): State<DoorHandleState>) -> impl IntoResponse {
    let snapshot = state.accessory.snapshot().await;

    Json(DoorResponse {
        current: snapshot.current.into(),
        target: snapshot.target.into(),
        is_moving: snapshot.is_moving,
        fault: state.host.characteristics().fault,
    })
}

pub async fn set_door_target(
    State(state): State<DoorHandleState>,
    Json(body): Json<TargetBody>,
) -> Result<impl IntoResponse, ApiError> {
    let code = u8::try_from(body.value).map_err(|_| ApiError::InvalidTarget(body.value))?;
    state.accessory.set_target_door_state(code).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn refresh_door(State(state): State<DoorHandleState>) -> Result<impl IntoResponse, ApiError> {
    let response = match state.accessory.refresh().await? {
        PollOutcome::Skipped => RefreshResponse::skipped(),
        PollOutcome::Updated(sample) => RefreshResponse::sampled(sample, true),
        PollOutcome::Discarded(sample) => RefreshResponse::sampled(sample, false),
    };

    Ok(Json(response))
}
