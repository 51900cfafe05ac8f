//! Registered student routes, including the password flows
//!
//! Plaintext passwords only ever reach the hasher; responses never carry
//! the stored hash.

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
    resource::{self, Operation, Resource},
    route_not_found,
};
use crate::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{NewStudent, RegisteredStudent, StudentChanges, StudentFilter},
    state::AppState,
};

const STUDENT: Resource = Resource {
    title: "Student",
    label: "student",
    plural: "students",
    conflict: "Student with this ID, email, or enrollment number already exists",
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const PASSWORD_NOT_SET: &str = "Password not set. Please set your password first.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetPasswordRequest {
    email: Option<String>,
    enrollment_number: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    email: Option<String>,
    current_password: Option<String>,
    new_password: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student).fallback(route_not_found))
        .route("/login", post(login).fallback(route_not_found))
        .route("/set-password", post(set_password).fallback(route_not_found))
        .route("/change-password", post(change_password).fallback(route_not_found))
        .route("/:id", put(update_student).delete(delete_student).fallback(route_not_found))
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Log a failed credential flow step and hide the cause from the caller
fn flow_failure(flow: &'static str, message: &str, err: impl std::fmt::Display) -> ApiError {
    error!(resource = STUDENT.label, operation = flow, error = %err, "Credential flow failed");
    ApiError::Internal(message.to_string())
}

/// All students, newest first; inactive students are included
async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<RegisteredStudent>>> {
    resource::list(state.students.as_ref(), &STUDENT, StudentFilter::default()).await
}

async fn create_student(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewStudent>,
) -> ApiResult<(StatusCode, Json<RegisteredStudent>)> {
    let (mut student, password) = payload.into_record(Utc::now())?;

    if let Some(password) = password {
        let hash = state
            .hasher
            .hash(password)
            .await
            .map_err(|e| STUDENT.internal(Operation::Create, e))?;
        student.password_hash = Some(hash);
    }

    resource::create(state.students.as_ref(), &STUDENT, &student).await
}

/// Partial update; a non-empty `password` replaces the stored hash
async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(mut changes): ApiJson<StudentChanges>,
) -> ApiResult<Json<RegisteredStudent>> {
    if let Some(password) = present(changes.password.take()) {
        let hash = state
            .hasher
            .hash(password)
            .await
            .map_err(|e| STUDENT.internal(Operation::Update, e))?;
        changes.password_hash = Some(hash);
    }

    resource::update(state.students.as_ref(), &STUDENT, &id, &changes).await
}

async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    resource::remove(state.students.as_ref(), &STUDENT, &id).await
}

/// Active student lookup by email
async fn active_by_email(
    state: &AppState,
    email: String,
    flow: &'static str,
    failure: &str,
) -> ApiResult<Option<RegisteredStudent>> {
    let filter = StudentFilter {
        email: Some(email),
        active_only: true,
        ..StudentFilter::default()
    };

    state
        .students
        .find_first(&filter)
        .await
        .map_err(|e| flow_failure(flow, failure, e))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(email), Some(password)) = (present(request.email), present(request.password)) else {
        return Err(ApiError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let student = active_by_email(&state, email, "login", "Login failed")
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let Some(hash) = student.password_hash.clone() else {
        return Err(ApiError::Unauthorized(PASSWORD_NOT_SET.to_string()));
    };

    let valid = state
        .hasher
        .verify(password, hash)
        .await
        .map_err(|e| flow_failure("login", "Login failed", e))?;
    if !valid {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    info!(student_id = %student.id, "Student logged in");

    Ok(Json(json!({
        "success": true,
        "student": student,
    })))
}

/// First-time or recovery password; email and enrollment number must match
async fn set_password(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SetPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    const FAILURE: &str = "Failed to set password";

    let (Some(email), Some(enrollment_number), Some(password)) = (
        present(request.email),
        present(request.enrollment_number),
        present(request.password),
    ) else {
        return Err(ApiError::Validation(
            "Email, enrollment number, and password are required".to_string(),
        ));
    };

    let filter = StudentFilter {
        email: Some(email),
        enrollment_number: Some(enrollment_number),
        active_only: true,
    };
    let student = state
        .students
        .find_first(&filter)
        .await
        .map_err(|e| flow_failure("set-password", FAILURE, e))?
        .ok_or_else(|| {
            ApiError::NotFound("Student not found or credentials do not match".to_string())
        })?;

    let hash = state
        .hasher
        .hash(password)
        .await
        .map_err(|e| flow_failure("set-password", FAILURE, e))?;
    state
        .students
        .update(&student.id, &StudentChanges::password_hash(hash))
        .await
        .map_err(|e| flow_failure("set-password", FAILURE, e))?;

    Ok(Json(json!({
        "success": true,
        "message": "Password set successfully",
    })))
}

/// Self-service change; the current password must verify first
async fn change_password(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    const FAILURE: &str = "Failed to change password";

    let (Some(email), Some(current_password), Some(new_password)) = (
        present(request.email),
        present(request.current_password),
        present(request.new_password),
    ) else {
        return Err(ApiError::Validation(
            "Email, current password, and new password are required".to_string(),
        ));
    };

    let student = active_by_email(&state, email, "change-password", FAILURE).await?;
    let Some((student, current_hash)) =
        student.and_then(|s| s.password_hash.clone().map(|hash| (s, hash)))
    else {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    let valid = state
        .hasher
        .verify(current_password, current_hash)
        .await
        .map_err(|e| flow_failure("change-password", FAILURE, e))?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let hash = state
        .hasher
        .hash(new_password)
        .await
        .map_err(|e| flow_failure("change-password", FAILURE, e))?;
    state
        .students
        .update(&student.id, &StudentChanges::password_hash(hash))
        .await
        .map_err(|e| flow_failure("change-password", FAILURE, e))?;

    Ok(Json(json!({
        "success": true,
        "message": "Password changed successfully",
    })))
}
