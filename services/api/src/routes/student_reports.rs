//! Student report routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::Utc;

use super::{
    resource::{self, Resource},
    route_not_found,
};
use crate::{
    error::ApiResult,
    extract::ApiJson,
    models::{NewStudentReport, StudentReport, StudentReportChanges},
    state::AppState,
};

const STUDENT_REPORT: Resource = Resource {
    title: "Student report",
    label: "student report",
    plural: "student reports",
    conflict: "Student report with this ID already exists",
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report).fallback(route_not_found))
        .route(
            "/:id",
            get(get_report)
                .put(update_report)
                .delete(delete_report)
                .fallback(route_not_found),
        )
}

/// All reports, most recently updated first
async fn list_reports(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentReport>>> {
    resource::list(state.student_reports.as_ref(), &STUDENT_REPORT, ()).await
}

async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<StudentReport>> {
    resource::fetch(state.student_reports.as_ref(), &STUDENT_REPORT, &id).await
}

async fn create_report(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewStudentReport>,
) -> ApiResult<(StatusCode, Json<StudentReport>)> {
    let report = payload.into_record(Utc::now())?;
    resource::create(state.student_reports.as_ref(), &STUDENT_REPORT, &report).await
}

async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<StudentReportChanges>,
) -> ApiResult<Json<StudentReport>> {
    resource::update(state.student_reports.as_ref(), &STUDENT_REPORT, &id, &changes).await
}

async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.student_reports.as_ref(), &STUDENT_REPORT, &id).await
}
