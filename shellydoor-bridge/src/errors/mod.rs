pub mod api;
pub mod bridge;
pub mod settings;

pub use api::ApiError;
pub use bridge::BridgeError;
pub use settings::SettingsError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, error_id) = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            let error_id = Uuid::new_v4();
            tracing::error!(error_id = ?error_id, "Internal error: {}", self);
            ("Internal server error".to_string(), Some(error_id.to_string()))
        } else {
            (self.to_string(), None)
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": message
        });

        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        let body = Json(json!({
            "error": error_obj
        }));

        (status, body).into_response()
    }
}
