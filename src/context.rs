//! Service context bundling the port trait objects.

use crate::adapters::live::{RobleAuthClient, RobleDataSource};
use crate::adapters::memory::{MemoryAuthClient, MemoryDataSource};
use crate::config::RobleConfig;
use crate::ports::auth::AuthClient;
use crate::ports::data_source::DataSource;

/// Bundles the port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations (live, memory); commands and
/// repositories only ever see the traits.
pub struct ServiceContext {
    /// Record store for course, enrollment, and period data.
    pub data: Box<dyn DataSource>,
    /// Auth service for login and registration.
    pub auth: Box<dyn AuthClient>,
}

impl ServiceContext {
    /// Creates a live context talking to the hosted Roble backend.
    #[must_use]
    pub fn live(config: &RobleConfig) -> Self {
        Self {
            data: Box::new(RobleDataSource::new(config)),
            auth: Box::new(RobleAuthClient::new(config)),
        }
    }

    /// Creates an in-process context with empty memory adapters.
    #[must_use]
    pub fn memory() -> Self {
        Self { data: Box::new(MemoryDataSource::new()), auth: Box::new(MemoryAuthClient::new()) }
    }

    /// Creates a context over an existing data source; used by tests that
    /// seed records up front.
    #[must_use]
    pub fn with_data(data: Box<dyn DataSource>) -> Self {
        Self { data, auth: Box::new(MemoryAuthClient::new()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_context_stores_records() {
        let ctx = ServiceContext::memory();
        let mut record = crate::ports::data_source::Record::new();
        record.insert("name".into(), json!("Rust"));

        ctx.data.create("courses", record).await.unwrap();
        assert_eq!(ctx.data.get_all("courses").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn with_data_uses_seeded_source() {
        let mut record = crate::ports::data_source::Record::new();
        record.insert("name".into(), json!("Rust"));
        let source = MemoryDataSource::seeded("courses", vec![record]);

        let ctx = ServiceContext::with_data(Box::new(source));
        assert_eq!(ctx.data.get_all("courses").await.unwrap().len(), 1);
    }
}
