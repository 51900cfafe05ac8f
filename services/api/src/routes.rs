//! API service routes

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    config::AppConfig,
    middleware::{PanicResponder, cors_layer, security_headers},
    state::AppState,
};

mod coordinators;
mod departments;
mod homepage_images;
mod officers;
mod programs;
pub mod resource;
mod student_reports;
mod students;

/// Create the router for the API service
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let [nosniff, frame_options, referrer_policy] = security_headers();

    Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(api_health_check))
        .nest("/api/departments", departments::router())
        .nest("/api/students", students::router())
        .nest("/api/coordinators", coordinators::router())
        .nest("/api/programs", programs::router())
        .nest("/api/homepage-images", homepage_images::router())
        .nest("/api/student-reports", student_reports::router())
        .nest("/api/officers", officers::router())
        .fallback(route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CatchPanicLayer::custom(PanicResponder::new(
            config.is_development(),
        )))
        .layer(nosniff)
        .layer(frame_options)
        .layer(referrer_policy)
        .layer(cors_layer(&config.cors_origins()))
        .layer(TraceLayer::new_for_http())
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Liveness check
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "timestamp": now(),
    }))
}

pub async fn api_health_check() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Server is running",
        "timestamp": now(),
        "success": true,
    }))
}

/// Unknown paths, and known paths with an unsupported method
async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
