use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Device not found")]
    DeviceNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Invalid device settings")]
    InvalidSettings,

    #[error("No state exists for sensor pin {0}")]
    UnmatchedPin(u8),
}

impl DeviceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DeviceError::DeviceNotFound => StatusCode::NOT_FOUND,
            DeviceError::InvalidPassword => StatusCode::BAD_REQUEST,
            DeviceError::InvalidSettings => StatusCode::BAD_REQUEST,
            DeviceError::UnmatchedPin(_) => StatusCode::BAD_REQUEST,
        }
    }
}
