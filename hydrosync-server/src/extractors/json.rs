use axum::extract::FromRequest;

use crate::errors::ApiError;

/// JSON body extractor that rejects with the API error body instead of
/// axum's plain-text response.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
