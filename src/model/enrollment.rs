//! Enrollment entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::str_field;
use crate::ident::{derive_local_id, LocalId, RemoteId};
use crate::ports::data_source::Record;

/// A student's enrollment in a course.
///
/// The stored record keeps the course's *remote* ID (the backend joins on
/// its own identifiers); the entity exposes the derived numeric course ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Derived numeric identifier of the enrollment record.
    pub id: LocalId,
    /// Derived numeric identifier of the enrolled course.
    pub course_id: LocalId,
    /// Email of the enrolled student.
    pub student_email: String,
}

impl Enrollment {
    /// Builds an enrollment from a stored record plus its derived ID.
    ///
    /// The course's numeric ID is re-derived from the stored remote ID, so it
    /// matches what the course repository hands out for the same course.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing or mistyped field.
    pub fn from_record(id: LocalId, record: &Record) -> Result<Self, String> {
        let course_remote = str_field(record, "course_id")?;
        Ok(Self {
            id,
            course_id: derive_local_id(&course_remote),
            student_email: str_field(record, "student_email")?,
        })
    }

    /// Renders an insert record pointing at the given course remote ID.
    #[must_use]
    pub fn record_for(course_remote: &RemoteId, student_email: &str) -> Record {
        let mut record = Record::new();
        record.insert("course_id".into(), Value::String(course_remote.as_str().to_string()));
        record.insert("student_email".into(), Value::String(student_email.to_string()));
        record
    }
}
