//! Department model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assign;
use crate::{error::ApiResult, repositories::Record, validation::RequiredFields};

/// Department entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New department creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepartment {
    pub id: Option<String>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl NewDepartment {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<Department> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let name = required.take("name", self.name);
        required.finish("ID and name are required")?;

        Ok(Department {
            id,
            name,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Department update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentChanges {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl Record for Department {
    type Filter = ();
    type Changes = DepartmentChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    fn apply(&mut self, changes: &DepartmentChanges, now: DateTime<Utc>) {
        assign(&mut self.name, &changes.name);
        assign(&mut self.is_active, &changes.is_active);
        self.updated_at = now;
    }
}
