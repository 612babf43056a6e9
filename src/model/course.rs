//! Course entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{opt_str_field, str_field};
use crate::ident::LocalId;
use crate::ports::data_source::Record;

/// A course offered for enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Derived numeric identifier.
    pub id: LocalId,
    /// Course title.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Catalog category (e.g. "systems", "arts").
    pub category: String,
    /// Email of the teacher who owns the course, when recorded.
    pub teacher: Option<String>,
}

impl Course {
    /// Builds a course from a stored record plus its derived ID.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing or mistyped field.
    pub fn from_record(id: LocalId, record: &Record) -> Result<Self, String> {
        Ok(Self {
            id,
            name: str_field(record, "name")?,
            description: str_field(record, "description")?,
            category: str_field(record, "category")?,
            teacher: opt_str_field(record, "teacher"),
        })
    }

    /// Renders the entity fields as a record for insert/update.
    ///
    /// The backend-assigned `_id` is never included; the data source owns it.
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), Value::String(self.name.clone()));
        record.insert("description".into(), Value::String(self.description.clone()));
        record.insert("category".into(), Value::String(self.category.clone()));
        if let Some(teacher) = &self.teacher {
            record.insert("teacher".into(), Value::String(teacher.clone()));
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_reads_all_fields() {
        let mut record = Record::new();
        record.insert("name".into(), json!("Rust"));
        record.insert("description".into(), json!("Systems programming"));
        record.insert("category".into(), json!("systems"));
        record.insert("teacher".into(), json!("ana@campus.edu"));

        let course = Course::from_record(LocalId::new(7), &record).unwrap();
        assert_eq!(course.name, "Rust");
        assert_eq!(course.teacher.as_deref(), Some("ana@campus.edu"));
    }

    #[test]
    fn from_record_rejects_missing_name() {
        let record = Record::new();
        let err = Course::from_record(LocalId::new(7), &record).unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn to_record_omits_id_and_absent_teacher() {
        let course = Course {
            id: LocalId::new(7),
            name: "Rust".into(),
            description: "Systems programming".into(),
            category: "systems".into(),
            teacher: None,
        };
        let record = course.to_record();
        assert!(!record.contains_key("_id"));
        assert!(!record.contains_key("teacher"));
        assert_eq!(record.get("name"), Some(&json!("Rust")));
    }
}
