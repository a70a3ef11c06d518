use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        register,
        authenticate,
        remove_device,
        get_settings,
        update_settings,
        get_states,
        update_client_states,
        update_device_states,
        update_password,
    ),
    components(schemas(
        hydrosync_api::RegisterRequest,
        hydrosync_api::LoginRequest,
        hydrosync_api::TokenResponse,
        hydrosync_api::UpdatePasswordRequest,
        hydrosync_api::Settings,
        hydrosync_api::SettingsResponse,
        hydrosync_api::UpdateSettingsRequest,
        hydrosync_api::State,
        hydrosync_api::SensorState,
        hydrosync_api::PumpState,
        hydrosync_api::ClientState,
        hydrosync_api::DeviceState,
        hydrosync_api::StatesResponse,
        hydrosync_api::UpdateClientStatesRequest,
        hydrosync_api::UpdateDeviceStatesRequest,
        hydrosync_api::MessageResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Device registration and authentication"),
        (name = "device", description = "Device settings and sensor/pump states")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn docs_router() -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/api/docs/openapi.json", get(openapi))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
