//! Officer routes
//!
//! Login matches the supplied `passwordHash` literally against the stored
//! value; no hashing happens on this path.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::{
    resource::{self, Resource},
    route_not_found,
};
use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{NewOfficer, OfficerChanges, OfficerCredential, OfficerFilter},
    state::AppState,
};

const OFFICER: Resource = Resource {
    title: "Officer",
    label: "officer",
    plural: "officers",
    conflict: "Officer with this ID or username already exists",
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfficerLogin {
    username: Option<String>,
    password_hash: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_officers).post(create_officer).fallback(route_not_found))
        .route("/login", post(login).fallback(route_not_found))
        .route("/:id", put(update_officer).delete(delete_officer).fallback(route_not_found))
}

/// Active officers by name
async fn list_officers(State(state): State<AppState>) -> ApiResult<Json<Vec<OfficerCredential>>> {
    let filter = OfficerFilter {
        active_only: true,
        ..OfficerFilter::default()
    };
    resource::list(state.officers.as_ref(), &OFFICER, filter).await
}

async fn create_officer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewOfficer>,
) -> ApiResult<(StatusCode, Json<OfficerCredential>)> {
    let officer = payload.into_record(Utc::now())?;
    resource::create(state.officers.as_ref(), &OFFICER, &officer).await
}

async fn update_officer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<OfficerChanges>,
) -> ApiResult<Json<OfficerCredential>> {
    resource::update(state.officers.as_ref(), &OFFICER, &id, &changes).await
}

async fn delete_officer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.officers.as_ref(), &OFFICER, &id).await
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<OfficerLogin>,
) -> ApiResult<impl IntoResponse> {
    let username = request.username.filter(|u| !u.is_empty());
    let password_hash = request.password_hash.filter(|p| !p.is_empty());
    if username.is_none() || password_hash.is_none() {
        return Err(ApiError::Validation(
            "Username and password are required".to_string(),
        ));
    }

    let filter = OfficerFilter {
        username,
        password_hash,
        active_only: true,
    };
    let officer = state
        .officers
        .find_first(&filter)
        .await
        .map_err(|e| {
            error!(resource = OFFICER.label, operation = "login", error = %e, "Credential flow failed");
            ApiError::Internal("Login failed".to_string())
        })?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    info!(officer_id = %officer.id, "Officer logged in");

    Ok(Json(json!({
        "success": true,
        "officer": officer,
    })))
}
