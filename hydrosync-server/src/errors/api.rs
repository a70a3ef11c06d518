use axum::extract::rejection::JsonRejection;

use super::{AuthError, DeviceError, StateError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Device error: {0}")]
    DeviceError(#[from] DeviceError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<StateError> for ApiError {
    fn from(value: StateError) -> Self {
        match value {
            StateError::UnknownDevice => DeviceError::DeviceNotFound.into(),
            StateError::UnmatchedPin(pin) => DeviceError::UnmatchedPin(pin).into(),
            StateError::Store(e) => e.into(),
        }
    }
}
