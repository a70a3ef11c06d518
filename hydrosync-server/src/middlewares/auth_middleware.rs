use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, Header};
use jsonwebtoken::errors::ErrorKind;

use crate::errors::{ApiError, AuthError};
use crate::services::TokenService;

/// Raw token header sent by the web client
pub const TOKEN_HEADER: &str = "token";

#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
}

pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let token = extract_token(req.headers())?;

    let token_data = state
        .token_service
        .retrieve_token_claims(&token)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

    token_data.claims.mac()?;

    req.extensions_mut().insert(token_data.claims);

    Ok(next.run(req).await)
}

fn extract_token(headers: &HeaderMap) -> Result<String, AuthError> {
    if headers.contains_key(header::AUTHORIZATION) {
        let mut values = headers.get_all(header::AUTHORIZATION).iter();
        let authorization: Authorization<Bearer> =
            Authorization::decode(&mut values).map_err(|_| AuthError::InvalidToken)?;

        return Ok(authorization.token().to_string());
    }

    headers
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingToken)
}
