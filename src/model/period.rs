//! Evaluation-period entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{opt_str_field, str_field};
use crate::ident::{derive_local_id, LocalId};
use crate::ports::data_source::Record;

/// A grading window attached to a course.
///
/// Dates are stored as RFC 3339 strings so every client parses them the same
/// way regardless of its local time handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPeriod {
    /// Derived numeric identifier.
    pub id: LocalId,
    /// Period label (e.g. "Midterm", "Final project").
    pub name: String,
    /// Start of the window.
    pub start: DateTime<Utc>,
    /// End of the window.
    pub end: DateTime<Utc>,
    /// Derived numeric ID of the course this period belongs to, when linked.
    pub course_id: Option<LocalId>,
}

impl EvaluationPeriod {
    /// Builds a period from a stored record plus its derived ID.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing, mistyped, or unparseable
    /// field.
    pub fn from_record(id: LocalId, record: &Record) -> Result<Self, String> {
        Ok(Self {
            id,
            name: str_field(record, "name")?,
            start: parse_date(record, "start")?,
            end: parse_date(record, "end")?,
            course_id: opt_str_field(record, "course_id").map(|r| derive_local_id(&r)),
        })
    }

    /// Renders the entity fields as a record for insert/update.
    ///
    /// The course link is written through [`record_with_course`]; this method
    /// covers unlinked periods and in-place field updates.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), Value::String(self.name.clone()));
        record.insert("start".into(), Value::String(self.start.to_rfc3339()));
        record.insert("end".into(), Value::String(self.end.to_rfc3339()));
        record
    }
}

/// Builds an insert record for a period, optionally linked to a course by its
/// remote ID.
#[must_use]
pub fn record_with_course(
    name: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    course_remote: Option<&str>,
) -> Record {
    let mut record = Record::new();
    record.insert("name".into(), Value::String(name.to_string()));
    record.insert("start".into(), Value::String(start.to_rfc3339()));
    record.insert("end".into(), Value::String(end.to_rfc3339()));
    if let Some(remote) = course_remote {
        record.insert("course_id".into(), Value::String(remote.to_string()));
    }
    record
}

fn parse_date(record: &Record, field: &str) -> Result<DateTime<Utc>, String> {
    let raw = str_field(record, field)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| format!("record field {field} is not an RFC 3339 date: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.insert("name".into(), json!("Midterm"));
        record.insert("start".into(), json!("2026-03-01T00:00:00+00:00"));
        record.insert("end".into(), json!("2026-03-15T23:59:00+00:00"));
        record
    }

    #[test]
    fn from_record_parses_dates() {
        let period = EvaluationPeriod::from_record(LocalId::new(3), &sample_record()).unwrap();
        assert_eq!(period.name, "Midterm");
        assert_eq!(period.start.to_rfc3339(), "2026-03-01T00:00:00+00:00");
        assert_eq!(period.course_id, None);
    }

    #[test]
    fn from_record_derives_course_link() {
        let mut record = sample_record();
        record.insert("course_id".into(), json!("abc123"));
        let period = EvaluationPeriod::from_record(LocalId::new(3), &record).unwrap();
        assert_eq!(period.course_id, Some(derive_local_id("abc123")));
    }

    #[test]
    fn from_record_rejects_bad_date() {
        let mut record = sample_record();
        record.insert("start".into(), json!("next tuesday"));
        let err = EvaluationPeriod::from_record(LocalId::new(3), &record).unwrap_err();
        assert!(err.contains("start"));
    }

    #[test]
    fn round_trip_preserves_fields() {
        let period = EvaluationPeriod::from_record(LocalId::new(3), &sample_record()).unwrap();
        let again =
            EvaluationPeriod::from_record(LocalId::new(3), &period.to_record()).unwrap();
        assert_eq!(period, again);
    }

    #[test]
    fn record_with_course_includes_link() {
        let period = EvaluationPeriod::from_record(LocalId::new(3), &sample_record()).unwrap();
        let record = record_with_course(&period.name, period.start, period.end, Some("abc123"));
        assert_eq!(record.get("course_id"), Some(&json!("abc123")));
    }
}
