//! Program routes

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
    models::{NewProgram, Program, ProgramChanges},
    state::AppState,
};

const PROGRAM: Resource = Resource {
    title: "Program",
    label: "program",
    plural: "programs",
    conflict: "Program with this ID already exists",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_programs).post(create_program).fallback(route_not_found))
        .route("/:id", put(update_program).delete(delete_program).fallback(route_not_found))
}

/// All programs, latest start date first
async fn list_programs(State(state): State<AppState>) -> ApiResult<Json<Vec<Program>>> {
    resource::list(state.programs.as_ref(), &PROGRAM, ()).await
}

async fn create_program(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewProgram>,
) -> ApiResult<(StatusCode, Json<Program>)> {
    let program = payload.into_record(Utc::now())?;
    resource::create(state.programs.as_ref(), &PROGRAM, &program).await
}

async fn update_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<ProgramChanges>,
) -> ApiResult<Json<Program>> {
    resource::update(state.programs.as_ref(), &PROGRAM, &id, &changes).await
}

async fn delete_program(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.programs.as_ref(), &PROGRAM, &id).await
}
