//! Coordinator model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assign;
use crate::{error::ApiResult, repositories::Record, validation::RequiredFields};

/// Coordinator entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinator {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub position: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New coordinator creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoordinator {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

impl NewCoordinator {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<Coordinator> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let name = required.take("name", self.name);
        let email = required.take("email", self.email);
        let phone = required.take("phone", self.phone);
        let department = required.take("department", self.department);
        let position = required.take("position", self.position);
        required.finish("All fields except isActive are required")?;

        Ok(Coordinator {
            id,
            name,
            email,
            phone,
            department,
            position,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Coordinator update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatorChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

/// Coordinator listing filter
#[derive(Debug, Clone, Default)]
pub struct CoordinatorFilter {
    pub active_only: bool,
}

impl Record for Coordinator {
    type Filter = CoordinatorFilter;
    type Changes = CoordinatorChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, filter: &CoordinatorFilter) -> bool {
        !filter.active_only || self.is_active
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    fn apply(&mut self, changes: &CoordinatorChanges, now: DateTime<Utc>) {
        assign(&mut self.name, &changes.name);
        assign(&mut self.email, &changes.email);
        assign(&mut self.phone, &changes.phone);
        assign(&mut self.department, &changes.department);
        assign(&mut self.position, &changes.position);
        assign(&mut self.is_active, &changes.is_active);
        self.updated_at = now;
    }
}
