//! Student report model

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::assign;
use crate::{error::ApiResult, repositories::Record, validation::RequiredFields};

/// Student report entity; activity lists keep their submitted order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub department: String,
    pub year: String,
    pub activities: Vec<Value>,
    pub coordinated_programs: Vec<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New student report payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentReport {
    pub id: Option<String>,
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub activities: Option<Vec<Value>>,
    pub coordinated_programs: Option<Vec<Value>>,
}

impl NewStudentReport {
    pub fn into_record(self, now: DateTime<Utc>) -> ApiResult<StudentReport> {
        let mut required = RequiredFields::new();
        let id = required.take("id", self.id);
        let student_id = required.take("studentId", self.student_id);
        let student_name = required.take("studentName", self.student_name);
        let department = required.take("department", self.department);
        let year = required.take("year", self.year);
        required.finish("Required fields missing")?;

        Ok(StudentReport {
            id,
            student_id,
            student_name,
            department,
            year,
            activities: self.activities.unwrap_or_default(),
            coordinated_programs: self.coordinated_programs.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Student report update payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReportChanges {
    pub student_id: Option<String>,
    pub student_name: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    pub activities: Option<Vec<Value>>,
    pub coordinated_programs: Option<Vec<Value>>,
}

impl Record for StudentReport {
    type Filter = ();
    type Changes = StudentReportChanges;

    fn id(&self) -> &str {
        &self.id
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        other.updated_at.cmp(&self.updated_at)
    }

    fn apply(&mut self, changes: &StudentReportChanges, now: DateTime<Utc>) {
        assign(&mut self.student_id, &changes.student_id);
        assign(&mut self.student_name, &changes.student_name);
        assign(&mut self.department, &changes.department);
        assign(&mut self.year, &changes.year);
        assign(&mut self.activities, &changes.activities);
        assign(&mut self.coordinated_programs, &changes.coordinated_programs);
        self.updated_at = now;
    }
}
