//! Program model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::assign;
use crate::{
    error::ApiResult,
    repositories::Record,
    validation::{RequiredFields, deserialize_nullable, deserialize_optional_date},
};

pub const DEFAULT_PROGRAM_TYPE: &str = "academic";

/// Program entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub program_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub max_participants: i32,
    pub registration_open: bool,
    pub department: String,
    pub coordinator: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New program creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    pub registration_open: Option<bool>,
    pub department: Option<String>,
    pub coordinator: Option<String>,
}

impl NewProgram {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<Program> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let title = required.take("title", self.title);
        let start_date = required.take("startDate", self.start_date);
        let end_date = required.take("endDate", self.end_date);
        let max_participants = required.take("maxParticipants", self.max_participants);
        let department = required.take("department", self.department);
        let coordinator = required.take("coordinator", self.coordinator);
        required.finish("Required fields missing")?;

        Ok(Program {
            id,
            title,
            description: self.description,
            program_type: self
                .program_type
                .unwrap_or_else(|| DEFAULT_PROGRAM_TYPE.to_string()),
            start_date,
            end_date,
            max_participants,
            registration_open: self.registration_open.unwrap_or(true),
            department,
            coordinator,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Program update payload; dates are normalized while deserializing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub end_date: Option<DateTime<Utc>>,
    pub max_participants: Option<i32>,
    pub registration_open: Option<bool>,
    pub department: Option<String>,
    pub coordinator: Option<String>,
}

impl Record for Program {
    type Filter = ();
    type Changes = ProgramChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        other.start_date.cmp(&self.start_date)
    }

    fn apply(&mut self, changes: &ProgramChanges, now: DateTime<Utc>) {
        assign(&mut self.title, &changes.title);
        assign(&mut self.description, &changes.description);
        assign(&mut self.program_type, &changes.program_type);
        assign(&mut self.start_date, &changes.start_date);
        assign(&mut self.end_date, &changes.end_date);
        assign(&mut self.max_participants, &changes.max_participants);
        assign(&mut self.registration_open, &changes.registration_open);
        assign(&mut self.department, &changes.department);
        assign(&mut self.coordinator, &changes.coordinator);
        self.updated_at = now;
    }
}
