use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use hydrosync_api::{MacAddress, Settings as DeviceSettings, State};
use hydrosync_server::app::{AppContext, create_router};
use hydrosync_server::configs::{Backend, Settings};
use hydrosync_server::services::MergePolicy;
use hydrosync_server::stores::MemoryStore;
use hydrosync_server::tests::{TEST_MAC, TEST_PASSWORD, test_settings};
use serde_json::Value;
use tower::ServiceExt;

pub struct MockApp {
    pub router: Router,
    pub context: AppContext,
}

impl MockApp {
    pub async fn new() -> Self {
        Self::with_settings(test_settings()).await
    }

    pub async fn with_sqlite() -> Self {
        let mut settings = test_settings();
        settings.database.backend = Backend::Sqlite;

        Self::with_settings(settings).await
    }

    pub async fn with_policy(policy: MergePolicy) -> Self {
        let mut settings = test_settings();
        settings.states.policy = policy;

        let context =
            AppContext::with_store(&settings, Arc::new(MemoryStore::new())).unwrap();

        Self {
            router: create_router(&context),
            context,
        }
    }

    async fn with_settings(settings: Settings) -> Self {
        let context = AppContext::new(&settings).await.unwrap();

        Self {
            router: create_router(&context),
            context,
        }
    }

    /// Store a device with [`TEST_PASSWORD`] and return a token for it.
    pub async fn create_test_device(&self, mac: &str, states: Vec<State>) -> String {
        let passhash = self.context.auth_service.hash(TEST_PASSWORD).unwrap();

        self.context
            .device_repository
            .create(mac, &passhash, DeviceSettings::default(), states)
            .await
            .unwrap();

        self.token_for(mac)
    }

    pub async fn create_default_device(&self) -> String {
        self.create_test_device(TEST_MAC, vec![]).await
    }

    pub fn token_for(&self, mac: &str) -> String {
        self.context
            .token_service
            .generate_token(&MacAddress::parse(mac).unwrap())
            .unwrap()
            .token
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.call(request).await
    }

    pub async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }
}
