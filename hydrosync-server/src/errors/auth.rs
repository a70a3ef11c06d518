use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid MAC address")]
    InvalidMac,

    #[error("Failed to authenticate")]
    InvalidCredentials,

    #[error("Device already exists")]
    DeviceExists,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidMac => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AuthError::DeviceExists => StatusCode::CONFLICT,
            AuthError::MissingToken => StatusCode::BAD_REQUEST,
            AuthError::InvalidToken => StatusCode::BAD_REQUEST,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
        }
    }
}
