//! Data source port for the hosted record store.
//!
//! The backend exposes named collections of flat field-mapping records.
//! Records travel as plain JSON objects; the backend assigns each record an
//! opaque string ID under the `_id` field. This port carries no wire format
//! of its own; serialization belongs to the adapters.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

/// A flat field-mapping record: string keys to JSON values.
pub type Record = serde_json::Map<String, Value>;

/// Boxed future type alias used by [`DataSource`] to keep the trait
/// dyn-compatible.
pub type SourceFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Field under which the backend stores its assigned record identifier.
pub const ID_FIELD: &str = "_id";

/// Generic CRUD access to named collections of records.
///
/// Implementations perform the network I/O (or its in-memory stand-in); the
/// repositories layered on top handle entity conversion and ID translation.
pub trait DataSource: Send + Sync {
    /// Inserts a record and returns it as stored, including the
    /// backend-assigned `_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected or the transport fails.
    fn create(&self, collection: &str, record: Record) -> SourceFuture<'_, Record>;

    /// Reads every record in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails; an empty collection is `Ok(vec![])`.
    fn get_all(&self, collection: &str) -> SourceFuture<'_, Vec<Record>>;

    /// Reads the record with the given backend-assigned ID, if present.
    ///
    /// # Errors
    ///
    /// Returns an error only on transport failure; a missing record is
    /// `Ok(None)`.
    fn get_by_id(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, Option<Record>>;

    /// Reads every record whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails; no matches is `Ok(vec![])`.
    fn get_where(&self, collection: &str, field: &str, value: Value)
        -> SourceFuture<'_, Vec<Record>>;

    /// Applies the given field changes to the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the update is
    /// rejected.
    fn update(&self, collection: &str, remote_id: &str, changes: Record) -> SourceFuture<'_, ()>;

    /// Deletes the record with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the delete is
    /// rejected.
    fn delete(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, ()>;
}

/// Extracts the backend-assigned ID from a stored record.
///
/// # Errors
///
/// Returns an error if the `_id` field is missing or not a string.
pub fn remote_id_of(record: &Record) -> Result<&str, Box<dyn Error + Send + Sync>> {
    record
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("record has no string {ID_FIELD} field").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remote_id_of_reads_id_field() {
        let mut record = Record::new();
        record.insert(ID_FIELD.into(), json!("r1"));
        assert_eq!(remote_id_of(&record).unwrap(), "r1");
    }

    #[test]
    fn remote_id_of_rejects_missing_field() {
        let record = Record::new();
        assert!(remote_id_of(&record).is_err());
    }

    #[test]
    fn remote_id_of_rejects_non_string_id() {
        let mut record = Record::new();
        record.insert(ID_FIELD.into(), json!(42));
        assert!(remote_id_of(&record).is_err());
    }
}
