//! Department routes

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
    models::{Department, DepartmentChanges, NewDepartment},
    state::AppState,
};

const DEPARTMENT: Resource = Resource {
    title: "Department",
    label: "department",
    plural: "departments",
    conflict: "Department with this ID already exists",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department).fallback(route_not_found))
        .route("/:id", put(update_department).delete(delete_department).fallback(route_not_found))
}

/// All departments by name
async fn list_departments(State(state): State<AppState>) -> ApiResult<Json<Vec<Department>>> {
    resource::list(state.departments.as_ref(), &DEPARTMENT, ()).await
}

async fn create_department(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewDepartment>,
) -> ApiResult<(StatusCode, Json<Department>)> {
    let department = payload.into_record(Utc::now())?;
    resource::create(state.departments.as_ref(), &DEPARTMENT, &department).await
}

async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<DepartmentChanges>,
) -> ApiResult<Json<Department>> {
    resource::update(state.departments.as_ref(), &DEPARTMENT, &id, &changes).await
}

async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.departments.as_ref(), &DEPARTMENT, &id).await
}
