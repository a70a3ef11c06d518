pub mod api;
pub mod auth;
pub mod device;
pub mod state;
pub mod store;

pub use api::ApiError;
pub use auth::AuthError;
pub use device::DeviceError;
pub use state::StateError;
pub use store::StoreError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_id) = match self {
            ApiError::AuthError(e) => (e.status_code(), e.to_string(), None),
            ApiError::DeviceError(e) => (e.status_code(), e.to_string(), None),
            ApiError::InvalidBody(message) => {
                tracing::debug!("Rejected request body: {}", message);
                (StatusCode::BAD_REQUEST, message, None)
            }
            ApiError::StoreError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(error_id.to_string()),
                )
            }
            ApiError::InternalError(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Internal error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(error_id.to_string()),
                )
            }
        };

        // Clients read `error` as a plain message
        let mut body = json!({
            "error": error_message,
            "code": status.as_u16(),
        });

        if let Some(error_id) = error_id {
            body["error_id"] = json!(error_id);
        }

        (status, Json(body)).into_response()
    }
}
