#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode, header},
};
use campus_api::{AppState, config::AppConfig, create_router, credentials::PasswordHasher};
use serde_json::Value;
use tower::ServiceExt;

pub const ORIGIN: &str = "http://localhost:5173";

pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        app_env: "test".to_string(),
        bcrypt_cost: 4,
        cors_origins: format!("{ORIGIN},http://localhost:3000"),
        body_limit_bytes: 64 * 1024,
        run_migrations: false,
    }
}

/// Router over empty in-memory stores
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = test_config();
        let state = AppState::in_memory(PasswordHasher::new(config.bcrypt_cost));

        Self {
            router: create_router(state, &config),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a request with an optional JSON body and decode the JSON reply
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.send(builder.body(body).unwrap()).await;
        let status = response.status();
        (status, json_body(response).await)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.call(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.call(Method::DELETE, uri, None).await
    }
}

/// Decode a JSON body; an empty body decodes to `Value::Null`
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

/// Ids of a JSON array response, in order
pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}
