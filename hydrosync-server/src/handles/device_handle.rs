use std::sync::Arc;

use anyhow::anyhow;
use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Extension, Json, Router, middleware};
use hydrosync_api::{
    MessageResponse, SettingsResponse, StateUpdate, StatesResponse, UpdateClientStatesRequest,
    UpdateDeviceStatesRequest, UpdatePasswordRequest, UpdateSettingsRequest,
};

use crate::errors::{ApiError, DeviceError};
use crate::extractors::ApiJson;
use crate::middlewares::{TokenState, auth};
use crate::repositories::DeviceRepository;
use crate::services::{AuthService, StateService, TokenClaims};

#[derive(Clone)]
pub struct DeviceAppState {
    pub auth_service: Arc<AuthService>,
    pub device_repository: Arc<DeviceRepository>,
    pub state_service: Arc<StateService>,
}

pub fn device_router(device_state: DeviceAppState, token_state: TokenState) -> Router {
    Router::new()
        .route(
            "/api/device/settings",
            get(get_settings).patch(update_settings),
        )
        .route("/api/device/states", get(get_states))
        .route("/api/device/states/client", patch(update_client_states))
        .route("/api/device/states/device", patch(update_device_states))
        .route("/api/device/password", patch(update_password))
        .route_layer(middleware::from_fn_with_state(token_state, auth))
        .with_state(device_state)
}

#[utoipa::path(
    get,
    path = "/api/device/settings",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Settings of the authenticated device", body = SettingsResponse),
        (status = 400, description = "Missing or invalid token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_settings(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let mac = token_data.mac()?;

    let settings = state
        .device_repository
        .find_settings(mac.as_str())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    Ok(Json(SettingsResponse { settings }))
}

#[utoipa::path(
    patch,
    path = "/api/device/settings",
    tag = "device",
    request_body = UpdateSettingsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Settings replaced", body = MessageResponse),
        (status = 400, description = "Invalid settings or token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn update_settings(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
    ApiJson(body): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mac = token_data.mac()?;

    if !body.settings.is_valid() {
        return Err(DeviceError::InvalidSettings.into());
    }

    let updated = state
        .device_repository
        .update_settings(mac.as_str(), body.settings)
        .await?;

    if !updated {
        return Err(DeviceError::DeviceNotFound.into());
    }

    tracing::info!(
        %mac,
        poll_frequency = body.settings.poll_frequency,
        "settings updated"
    );

    Ok(Json(MessageResponse::new("Settings successfully updated.")))
}

#[utoipa::path(
    get,
    path = "/api/device/states",
    tag = "device",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Merged sensor/pump states of the device", body = StatesResponse),
        (status = 400, description = "Missing or invalid token"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_states(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
) -> Result<Json<StatesResponse>, ApiError> {
    let mac = token_data.mac()?;

    let states = state
        .device_repository
        .find_states(mac.as_str())
        .await?
        .ok_or(DeviceError::DeviceNotFound)?;

    Ok(Json(StatesResponse { states }))
}

#[utoipa::path(
    patch,
    path = "/api/device/states/client",
    tag = "device",
    request_body = UpdateClientStatesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Thresholds and speeds merged", body = MessageResponse),
        (status = 400, description = "Invalid token or unmatched pin"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn update_client_states(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
    ApiJson(body): ApiJson<UpdateClientStatesRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    apply_states(&state, &token_data, StateUpdate::Client(body.states)).await
}

#[utoipa::path(
    patch,
    path = "/api/device/states/device",
    tag = "device",
    request_body = UpdateDeviceStatesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Levels and pump activity merged", body = MessageResponse),
        (status = 400, description = "Invalid token or unmatched pin"),
        (status = 404, description = "Device not found")
    )
)]
pub async fn update_device_states(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
    ApiJson(body): ApiJson<UpdateDeviceStatesRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    apply_states(&state, &token_data, StateUpdate::Device(body.states)).await
}

async fn apply_states(
    state: &DeviceAppState,
    token_data: &TokenClaims,
    update: StateUpdate,
) -> Result<Json<MessageResponse>, ApiError> {
    let mac = token_data.mac()?;

    state.state_service.apply_partial_states(&mac, update).await?;

    Ok(Json(MessageResponse::new("States successfully updated.")))
}

#[utoipa::path(
    patch,
    path = "/api/device/password",
    tag = "device",
    request_body = UpdatePasswordRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Empty password or invalid token"),
        (status = 404, description = "Device not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_password(
    Extension(token_data): Extension<TokenClaims>,
    State(state): State<DeviceAppState>,
    ApiJson(body): ApiJson<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mac = token_data.mac()?;

    if body.password.is_empty() {
        return Err(DeviceError::InvalidPassword.into());
    }

    let passhash = state
        .auth_service
        .hash(&body.password)
        .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

    let updated = state
        .device_repository
        .update_passhash(mac.as_str(), &passhash)
        .await?;

    if !updated {
        return Err(DeviceError::DeviceNotFound.into());
    }

    tracing::info!(%mac, "password updated");

    Ok(Json(MessageResponse::new("Password successfully updated.")))
}
