//! Registered student model
//!
//! `password_hash` is computed server-side from a plaintext password and is
//! never serialized. It stays `None` until the student sets a password.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assign;
use crate::{error::ApiResult, repositories::Record, validation::RequiredFields};

/// Registered student entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredStudent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub year: String,
    pub enrollment_number: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New student registration payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub enrollment_number: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl NewStudent {
    /// Validate the payload, returning the record (without a hash) and the
    /// plaintext password to hash, if one was supplied.
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<(RegisteredStudent, Option<String>)> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let name = required.take("name", self.name);
        let email = required.take("email", self.email);
        let phone = required.take("phone", self.phone);
        let department = required.take("department", self.department);
        let year = required.take("year", self.year);
        let enrollment_number = required.take("enrollmentNumber", self.enrollment_number);
        required.finish("All fields are required")?;

        let student = RegisteredStudent {
            id,
            name,
            email,
            phone,
            department,
            year,
            enrollment_number,
            password_hash: None,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        let password = self.password.filter(|p| !p.is_empty());

        Ok((student, password))
    }
}

/// Student update payload
///
/// A plaintext `password` is hashed by the handler into `password_hash`;
/// a `passwordHash` key in the request body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub enrollment_number: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl StudentChanges {
    /// Changes that only replace the stored hash
    pub fn password_hash(hash: String) -> Self {
        Self {
            password_hash: Some(hash),
            ..Self::default()
        }
    }
}

/// Student lookup filter
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub email: Option<String>,
    pub enrollment_number: Option<String>,
    pub active_only: bool,
}

impl Record for RegisteredStudent {
    type Filter = StudentFilter;
    type Changes = StudentChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id == other.id
            || self.email == other.email
            || self.enrollment_number == other.enrollment_number
    }

    fn matches(&self, filter: &StudentFilter) -> bool {
        filter.email.as_ref().is_none_or(|e| *e == self.email)
            && filter
                .enrollment_number
                .as_ref()
                .is_none_or(|n| *n == self.enrollment_number)
            && (!filter.active_only || self.is_active)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }

    fn apply(&mut self, changes: &StudentChanges, now: DateTime<Utc>) {
        assign(&mut self.name, &changes.name);
        assign(&mut self.email, &changes.email);
        assign(&mut self.phone, &changes.phone);
        assign(&mut self.department, &changes.department);
        assign(&mut self.year, &changes.year);
        assign(&mut self.enrollment_number, &changes.enrollment_number);
        assign(&mut self.is_active, &changes.is_active);
        if changes.password_hash.is_some() {
            self.password_hash = changes.password_hash.clone();
        }
        self.updated_at = now;
    }
}
