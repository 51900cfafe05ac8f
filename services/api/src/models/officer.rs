//! Officer credential model
//!
//! The stored `password_hash` is never serialized. Officer login matches the
//! supplied `passwordHash` value literally against the stored column.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assign;
use crate::{error::ApiResult, repositories::Record, validation::RequiredFields};

pub const DEFAULT_ROLE: &str = "officer";

/// Officer credential entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerCredential {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New officer creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOfficer {
    pub id: Option<String>,
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

impl NewOfficer {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<OfficerCredential> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let username = required.take("username", self.username);
        let password_hash = required.take("passwordHash", self.password_hash);
        let name = required.take("name", self.name);
        let email = required.take("email", self.email);
        required.finish("All fields except role and isActive are required")?;

        Ok(OfficerCredential {
            id,
            username,
            password_hash,
            name,
            email,
            role: self.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Officer update payload; `id` and `passwordHash` are not accepted here
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerChanges {
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Officer lookup filter
#[derive(Debug, Clone, Default)]
pub struct OfficerFilter {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub active_only: bool,
}

impl Record for OfficerCredential {
    type Filter = OfficerFilter;
    type Changes = OfficerChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id == other.id || self.username == other.username
    }

    fn matches(&self, filter: &OfficerFilter) -> bool {
        filter.username.as_ref().is_none_or(|u| *u == self.username)
            && filter
                .password_hash
                .as_ref()
                .is_none_or(|h| *h == self.password_hash)
            && (!filter.active_only || self.is_active)
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    fn apply(&mut self, changes: &OfficerChanges, now: DateTime<Utc>) {
        assign(&mut self.username, &changes.username);
        assign(&mut self.name, &changes.name);
        assign(&mut self.email, &changes.email);
        assign(&mut self.role, &changes.role);
        assign(&mut self.is_active, &changes.is_active);
        self.updated_at = now;
    }
}
