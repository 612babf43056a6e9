//! Application entities and their record-map conversions.
//!
//! Entities carry the derived numeric ID; the backend's string ID never
//! leaves the repository layer. Conversion from a stored record is fallible
//! because the hosted store enforces no schema.

pub mod course;
pub mod enrollment;
pub mod period;

pub use course::Course;
pub use enrollment::Enrollment;
pub use period::EvaluationPeriod;

use serde_json::Value;

use crate::ports::data_source::Record;

/// Reads a required string field from a record.
///
/// # Errors
///
/// Returns an error naming the field when it is missing or not a string.
pub(crate) fn str_field(record: &Record, field: &str) -> Result<String, String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| format!("record is missing string field {field}"))
}

/// Reads an optional string field from a record; absent or null is `None`.
pub(crate) fn opt_str_field(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(Value::as_str).map(String::from)
}
