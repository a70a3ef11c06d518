use std::sync::Arc;

use anyhow::{Context, anyhow};
use axum::Router;
use axum::http::Request;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::configs::{Backend, SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::TokenState;
use crate::repositories::DeviceRepository;
use crate::services::{AuthService, StateService, TokenService};
use crate::stores::{DeviceStore, MemoryStore, SqliteStore};

/// Services shared by every router.
#[derive(Clone)]
pub struct AppContext {
    pub device_repository: Arc<DeviceRepository>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub state_service: Arc<StateService>,
}

impl AppContext {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let store: Arc<dyn DeviceStore> = match settings.database.backend {
            Backend::Memory => Arc::new(MemoryStore::new()),
            Backend::Sqlite => {
                let storage = Storage::new(settings.database.clone(), SchemaManager::default())
                    .await
                    .context("Failed to open device storage")?;
                Arc::new(SqliteStore::new(Arc::new(storage)))
            }
        };

        tracing::info!(backend = ?settings.database.backend, "device store ready");

        Self::with_store(settings, store)
    }

    pub fn with_store(settings: &Settings, store: Arc<dyn DeviceStore>) -> anyhow::Result<Self> {
        let device_repository = Arc::new(DeviceRepository::new(store));

        let auth_service = Arc::new(
            AuthService::new(&settings.auth.hashing)
                .map_err(|e| anyhow!("Invalid hashing parameters: {}", e))?,
        );
        let token_service = Arc::new(TokenService::new(settings.auth.clone()));
        let state_service = Arc::new(StateService::new(
            device_repository.clone(),
            settings.states.policy,
        ));

        Ok(Self {
            device_repository,
            auth_service,
            token_service,
            state_service,
        })
    }
}

pub fn create_router(context: &AppContext) -> Router {
    let token_state = TokenState {
        token_service: context.token_service.clone(),
    };

    let auth = auth_router(
        AuthState {
            auth_service: context.auth_service.clone(),
            token_service: context.token_service.clone(),
            device_repository: context.device_repository.clone(),
        },
        token_state.clone(),
    );

    let device = device_router(
        DeviceAppState {
            auth_service: context.auth_service.clone(),
            device_repository: context.device_repository.clone(),
            state_service: context.state_service.clone(),
        },
        token_state,
    );

    Router::new()
        .merge(auth)
        .merge(device)
        .merge(docs_router())
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http",
                    %request_id,
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

pub async fn create_app(settings: &Settings) -> anyhow::Result<Router> {
    let context = AppContext::new(settings).await?;

    Ok(create_router(&context))
}
