//! Coordinator routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::Utc;

use super::{
    resource::{self, Resource},
    route_not_found,
};
use crate::{
    error::ApiResult,
    extract::ApiJson,
    models::{Coordinator, CoordinatorChanges, CoordinatorFilter, NewCoordinator},
    state::AppState,
};

const COORDINATOR: Resource = Resource {
    title: "Coordinator",
    label: "coordinator",
    plural: "coordinators",
    conflict: "Coordinator with this ID already exists",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_coordinators).post(create_coordinator).fallback(route_not_found))
        .route("/:id", put(update_coordinator).delete(delete_coordinator).fallback(route_not_found))
}

/// Active coordinators by name
async fn list_coordinators(State(state): State<AppState>) -> ApiResult<Json<Vec<Coordinator>>> {
    let filter = CoordinatorFilter { active_only: true };
    resource::list(state.coordinators.as_ref(), &COORDINATOR, filter).await
}

async fn create_coordinator(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewCoordinator>,
) -> ApiResult<(StatusCode, Json<Coordinator>)> {
    let coordinator = payload.into_record(Utc::now())?;
    resource::create(state.coordinators.as_ref(), &COORDINATOR, &coordinator).await
}

async fn update_coordinator(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<CoordinatorChanges>,
) -> ApiResult<Json<Coordinator>> {
    resource::update(state.coordinators.as_ref(), &COORDINATOR, &id, &changes).await
}

async fn delete_coordinator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.coordinators.as_ref(), &COORDINATOR, &id).await
}
