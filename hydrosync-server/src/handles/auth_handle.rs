use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::routing::{delete, post};
use axum::{Extension, Json, Router, middleware};
use hydrosync_api::{
    LoginRequest, MacAddress, MessageResponse, RegisterRequest, Settings, TokenResponse,
};

use crate::errors::{ApiError, AuthError, DeviceError};
use crate::extractors::ApiJson;
use crate::middlewares::{TokenState, auth};
use crate::repositories::DeviceRepository;
use crate::services::{AuthService, TokenClaims, TokenService};

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub device_repository: Arc<DeviceRepository>,
}

pub fn auth_router(auth_state: AuthState, token_state: TokenState) -> Router {
    Router::new()
        .route(
            "/api/register",
            post(register).merge(
                delete(remove_device)
                    .route_layer(middleware::from_fn_with_state(token_state, auth)),
            ),
        )
        .route("/api/authenticate", post(authenticate))
        .route("/api/login", post(authenticate))
        .with_state(auth_state)
}

#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Device registered, return device token", body = TokenResponse),
        (status = 400, description = "Invalid MAC address or password"),
        (status = 409, description = "Device already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<AuthState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mac = MacAddress::parse(&body.mac).map_err(|_| AuthError::InvalidMac)?;

    if body.password.is_empty() {
        return Err(DeviceError::InvalidPassword.into());
    }

    if state.device_repository.find_shallow(mac.as_str()).await?.is_some() {
        return Err(AuthError::DeviceExists.into());
    }

    let passhash = state
        .auth_service
        .hash(&body.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let created = state
        .device_repository
        .create(mac.as_str(), &passhash, Settings::default(), vec![])
        .await?;

    if !created {
        return Err(AuthError::DeviceExists.into());
    }

    let token = match state.token_service.generate_token(&mac) {
        Ok(token) => token,
        Err(e) => {
            // Undo the registration, the device must always be able to log in
            state.device_repository.remove(mac.as_str()).await?;
            return Err(anyhow!("Failed to generate token: {}", e).into());
        }
    };

    tracing::info!(mac = %token.mac, exp = token.exp, "device registered");

    Ok(Json(TokenResponse { token: token.token }))
}

#[utoipa::path(
    post,
    path = "/api/authenticate",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authentication successful, return device token", body = TokenResponse),
        (status = 400, description = "Invalid MAC address, unknown device or wrong password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn authenticate(
    State(state): State<AuthState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mac = MacAddress::parse(&body.mac).map_err(|_| AuthError::InvalidCredentials)?;

    let device = state
        .device_repository
        .find_shallow(mac.as_str())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let result = state
        .auth_service
        .verify(&device.passhash, &body.password)
        .map_err(|e| anyhow!("Failed to verify password: {}", e))?;

    if !result {
        tracing::warn!(%mac, "authentication failed: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .token_service
        .generate_token(&mac)
        .map_err(|e| anyhow!("Failed to generate token: {}", e))?;

    tracing::info!(mac = %token.mac, iat = token.iat, exp = token.exp, "token issued");

    Ok(Json(TokenResponse { token: token.token }))
}

#[utoipa::path(
    delete,
    path = "/api/register",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Device removed", body = MessageResponse),
        (status = 400, description = "Missing or invalid token"),
        (status = 401, description = "Token has expired"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn remove_device(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<AuthState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mac = token_data.mac()?;

    if !state.device_repository.remove(mac.as_str()).await? {
        return Err(DeviceError::DeviceNotFound.into());
    }

    tracing::info!(%mac, "device removed");

    Ok(Json(MessageResponse::new("Device successfully removed.")))
}
