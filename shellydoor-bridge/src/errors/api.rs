use axum::http::StatusCode;
use shellydoor_core::DoorError;
use shellydoor_core::errors::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Door error: {0}")]
    DoorError(#[from] DoorError),

    #[error("Invalid door state code {0}")]
    InvalidTarget(i64),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::DoorError(e) => match e {
                DoorError::InvalidState(_) => StatusCode::BAD_REQUEST,
                DoorError::Command { .. } => StatusCode::BAD_GATEWAY,
                DoorError::Transport(_) => StatusCode::BAD_GATEWAY,
                DoorError::Extraction(_) => StatusCode::BAD_GATEWAY,
                DoorError::Config(ConfigError::MissingStatusUrl) => StatusCode::CONFLICT,
                DoorError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InvalidTarget(_) => StatusCode::BAD_REQUEST,
        }
    }
}
