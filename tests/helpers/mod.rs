//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use guildnet_api::extractors::auth::USER_HEADER;
use guildnet_api::{AppState, build_app};
use guildnet_core::config::AppConfig;
use guildnet_core::types::UserId;
use guildnet_store::StoreManager;

/// Test application over the in-memory store backend.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Store handles for direct assertions.
    pub stores: StoreManager,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let config = AppConfig::default();
        let stores = StoreManager::in_memory(config.store.change_buffer);
        let state = AppState::new(config, stores.clone());

        Self {
            router: build_app(state),
            stores,
        }
    }

    /// Issue a request as the given user and parse the JSON response.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<UserId>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_HEADER, user.to_string());
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, json)
    }

    /// GET as the given user.
    pub async fn get(&self, uri: &str, user: UserId) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user), None).await
    }

    /// POST a JSON body as the given user.
    pub async fn post(&self, uri: &str, user: UserId, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    /// PUT a JSON body as the given user.
    pub async fn put(&self, uri: &str, user: UserId, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(user), Some(body)).await
    }
}

/// JSON payload for a resolved profile.
pub fn profile_json(id: UserId, name: &str, email: Option<&str>) -> Value {
    serde_json::json!({
        "id": id,
        "display_name": name,
        "avatar_url": null,
        "email": email,
    })
}
