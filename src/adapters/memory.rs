//! In-memory adapters for tests and offline runs.
//!
//! Selected at dispatch time via `AULA_BACKEND=memory`. Records live in a
//! mutex-guarded map for the life of the process; remote IDs are minted as
//! v4 UUIDs so they look like the backend's opaque identifiers.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use uuid::Uuid;

use crate::ports::auth::{AuthClient, AuthFuture, Session};
use crate::ports::data_source::{DataSource, Record, SourceFuture, ID_FIELD};

/// In-memory record store implementing the `DataSource` port.
#[derive(Default)]
pub struct MemoryDataSource {
    collections: Mutex<HashMap<String, Vec<Record>>>,
}

impl MemoryDataSource {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with records; useful for tests.
    ///
    /// Records without an `_id` get one minted.
    #[must_use]
    pub fn seeded(collection: &str, records: Vec<Record>) -> Self {
        let source = Self::new();
        {
            let mut collections = source.collections.lock().unwrap_or_else(|e| e.into_inner());
            let stored = collections.entry(collection.to_string()).or_default();
            for mut record in records {
                record
                    .entry(ID_FIELD.to_string())
                    .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
                stored.push(record);
            }
        }
        source
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get(ID_FIELD).and_then(Value::as_str)
}

impl DataSource for MemoryDataSource {
    fn create(&self, collection: &str, mut record: Record) -> SourceFuture<'_, Record> {
        let collection = collection.to_string();
        Box::pin(async move {
            record.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
            let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            collections.entry(collection).or_default().push(record.clone());
            Ok(record)
        })
    }

    fn get_all(&self, collection: &str) -> SourceFuture<'_, Vec<Record>> {
        let collection = collection.to_string();
        Box::pin(async move {
            let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            Ok(collections.get(&collection).cloned().unwrap_or_default())
        })
    }

    fn get_by_id(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, Option<Record>> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            Ok(collections
                .get(&collection)
                .and_then(|records| {
                    records.iter().find(|r| record_id(r) == Some(remote_id.as_str()))
                })
                .cloned())
        })
    }

    fn get_where(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> SourceFuture<'_, Vec<Record>> {
        let collection = collection.to_string();
        let field = field.to_string();
        Box::pin(async move {
            let collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            Ok(collections
                .get(&collection)
                .map(|records| {
                    records.iter().filter(|r| r.get(&field) == Some(&value)).cloned().collect()
                })
                .unwrap_or_default())
        })
    }

    fn update(&self, collection: &str, remote_id: &str, changes: Record) -> SourceFuture<'_, ()> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            let records = collections
                .get_mut(&collection)
                .ok_or_else(|| format!("no collection {collection}"))?;
            let record = records
                .iter_mut()
                .find(|r| record_id(r) == Some(remote_id.as_str()))
                .ok_or_else(|| format!("no record {remote_id} in {collection}"))?;
            for (key, value) in changes {
                if key != ID_FIELD {
                    record.insert(key, value);
                }
            }
            Ok(())
        })
    }

    fn delete(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, ()> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let mut collections = self.collections.lock().unwrap_or_else(|e| e.into_inner());
            let records = collections
                .get_mut(&collection)
                .ok_or_else(|| format!("no collection {collection}"))?;
            let before = records.len();
            records.retain(|r| record_id(r) != Some(remote_id.as_str()));
            if records.len() == before {
                return Err(format!("no record {remote_id} in {collection}").into());
            }
            Ok(())
        })
    }
}

/// In-memory auth client: accounts exist only for the process lifetime.
#[derive(Default)]
pub struct MemoryAuthClient {
    accounts: Mutex<HashMap<String, (String, String)>>,
}

impl MemoryAuthClient {
    /// Creates a client with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthClient for MemoryAuthClient {
    fn login(&self, email: &str, password: &str) -> AuthFuture<'_, Session> {
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move {
            let accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
            match accounts.get(&email) {
                Some((stored, name)) if *stored == password => Ok(Session {
                    access_token: Uuid::new_v4().to_string(),
                    refresh_token: Uuid::new_v4().to_string(),
                    user_email: email.clone(),
                    user_name: Some(name.clone()),
                }),
                _ => Err("invalid email or password".into()),
            }
        })
    }

    fn register(&self, name: &str, email: &str, password: &str) -> AuthFuture<'_, ()> {
        let name = name.to_string();
        let email = email.to_string();
        let password = password.to_string();
        Box::pin(async move {
            let mut accounts = self.accounts.lock().unwrap_or_else(|e| e.into_inner());
            if accounts.contains_key(&email) {
                return Err(format!("account {email} already exists").into());
            }
            accounts.insert(email, (password, name));
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: &[(&str, Value)]) -> Record {
        fields.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect()
    }

    #[tokio::test]
    async fn create_mints_an_id_and_stores() {
        let source = MemoryDataSource::new();
        let stored = source.create("courses", record(&[("name", json!("Rust"))])).await.unwrap();
        assert!(stored.get(ID_FIELD).and_then(Value::as_str).is_some());

        let all = source.get_all("courses").await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn get_by_id_finds_stored_record() {
        let source = MemoryDataSource::new();
        let stored = source.create("courses", record(&[("name", json!("Rust"))])).await.unwrap();
        let id = record_id(&stored).unwrap().to_string();

        let found = source.get_by_id("courses", &id).await.unwrap();
        assert_eq!(found.unwrap().get("name"), Some(&json!("Rust")));
        assert!(source.get_by_id("courses", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_where_filters_by_field() {
        let source = MemoryDataSource::seeded(
            "courses",
            vec![
                record(&[("name", json!("Rust")), ("category", json!("systems"))]),
                record(&[("name", json!("Piano")), ("category", json!("arts"))]),
            ],
        );
        let matches = source.get_where("courses", "category", json!("systems")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].get("name"), Some(&json!("Rust")));
    }

    #[tokio::test]
    async fn update_merges_changes_but_keeps_id() {
        let source = MemoryDataSource::new();
        let stored = source.create("courses", record(&[("name", json!("Rust"))])).await.unwrap();
        let id = record_id(&stored).unwrap().to_string();

        source
            .update("courses", &id, record(&[("name", json!("Rust 2024")), (ID_FIELD, json!("x"))]))
            .await
            .unwrap();

        let found = source.get_by_id("courses", &id).await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("Rust 2024")));
        assert_eq!(record_id(&found), Some(id.as_str()));
    }

    #[tokio::test]
    async fn delete_removes_and_errors_on_missing() {
        let source = MemoryDataSource::new();
        let stored = source.create("courses", record(&[("name", json!("Rust"))])).await.unwrap();
        let id = record_id(&stored).unwrap().to_string();

        source.delete("courses", &id).await.unwrap();
        assert!(source.get_all("courses").await.unwrap().is_empty());
        assert!(source.delete("courses", &id).await.is_err());
    }

    #[tokio::test]
    async fn register_then_login_round_trips() {
        let auth = MemoryAuthClient::new();
        auth.register("Ana", "ana@campus.edu", "secret").await.unwrap();

        let session = auth.login("ana@campus.edu", "secret").await.unwrap();
        assert_eq!(session.user_email, "ana@campus.edu");
        assert_eq!(session.user_name.as_deref(), Some("Ana"));

        assert!(auth.login("ana@campus.edu", "wrong").await.is_err());
        assert!(auth.register("Ana", "ana@campus.edu", "again").await.is_err());
    }
}
