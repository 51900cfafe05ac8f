//! Shared list / fetch / create / update / delete handling
//!
//! Every resource runs the same store call and maps store failures to
//! responses the same way; only the wording differs per resource.

use axum::{Json, http::StatusCode};
use common::error::DatabaseError;
use serde::Serialize;
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    repositories::{Record, Repository},
};

/// Wording used in logs and error bodies for one resource
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    /// Singular, capitalized ("Department")
    pub title: &'static str,
    /// Singular, lowercase ("department")
    pub label: &'static str,
    /// Plural, lowercase ("departments")
    pub plural: &'static str,
    /// Body of a unique constraint violation
    pub conflict: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Fetch => "fetch",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl Resource {
    pub fn not_found(&self) -> ApiError {
        ApiError::NotFound(format!("{} not found", self.title))
    }

    /// Generic failure message for an operation
    pub fn failure(&self, operation: Operation) -> String {
        match operation {
            Operation::List => format!("Failed to fetch {}", self.plural),
            Operation::Fetch => format!("Failed to fetch {}", self.label),
            Operation::Create => format!("Failed to create {}", self.label),
            Operation::Update => format!("Failed to update {}", self.label),
            Operation::Delete => format!("Failed to delete {}", self.label),
        }
    }

    /// Log a store failure and translate it into a response error
    pub fn store_error(&self, operation: Operation, err: DatabaseError) -> ApiError {
        error!(
            resource = self.label,
            operation = operation.as_str(),
            error = %err,
            "Store operation failed"
        );

        match err {
            DatabaseError::AlreadyExists => ApiError::Conflict(self.conflict.to_string()),
            DatabaseError::NotFound if operation != Operation::Create => self.not_found(),
            _ => ApiError::Internal(self.failure(operation)),
        }
    }

    /// Log a failure outside the store (e.g. hashing) as an internal error
    pub fn internal(&self, operation: Operation, err: impl std::fmt::Display) -> ApiError {
        error!(
            resource = self.label,
            operation = operation.as_str(),
            error = %err,
            "Request failed"
        );
        ApiError::Internal(self.failure(operation))
    }
}

pub async fn list<R>(
    repo: &dyn Repository<R>,
    resource: &Resource,
    filter: R::Filter,
) -> ApiResult<Json<Vec<R>>>
where
    R: Record + Serialize,
{
    let records = repo
        .list(&filter)
        .await
        .map_err(|e| resource.store_error(Operation::List, e))?;

    Ok(Json(records))
}

pub async fn fetch<R>(repo: &dyn Repository<R>, resource: &Resource, id: &str) -> ApiResult<Json<R>>
where
    R: Record + Serialize,
{
    repo.find(id)
        .await
        .map_err(|e| resource.store_error(Operation::Fetch, e))?
        .map(Json)
        .ok_or_else(|| resource.not_found())
}

pub async fn create<R>(
    repo: &dyn Repository<R>,
    resource: &Resource,
    record: &R,
) -> ApiResult<(StatusCode, Json<R>)>
where
    R: Record + Serialize,
{
    let created = repo
        .create(record)
        .await
        .map_err(|e| resource.store_error(Operation::Create, e))?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<R>(
    repo: &dyn Repository<R>,
    resource: &Resource,
    id: &str,
    changes: &R::Changes,
) -> ApiResult<Json<R>>
where
    R: Record + Serialize,
{
    let updated = repo
        .update(id, changes)
        .await
        .map_err(|e| resource.store_error(Operation::Update, e))?;

    Ok(Json(updated))
}

pub async fn remove<R>(repo: &dyn Repository<R>, resource: &Resource, id: &str) -> ApiResult<StatusCode>
where
    R: Record,
{
    repo.delete(id)
        .await
        .map_err(|e| resource.store_error(Operation::Delete, e))?;

    Ok(StatusCode::NO_CONTENT)
}
