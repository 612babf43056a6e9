//! Live adapter for the `DataSource` port using the Roble database API.
//!
//! Roble exposes one generic CRUD surface per project contract:
//! `POST   /database/{contract}/insert`
//! `GET    /database/{contract}/read?tableName=..[&column=value]`
//! `PUT    /database/{contract}/update`
//! `DELETE /database/{contract}/delete`
//! All write endpoints address records by column/value; reads filter by query
//! parameters. Requests carry the session's bearer token.

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::RobleConfig;
use crate::ports::data_source::{DataSource, Record, SourceFuture, ID_FIELD};

/// Live data source that calls the Roble database API.
pub struct RobleDataSource {
    client: Client,
    base_url: String,
    contract: String,
    access_token: Option<String>,
}

impl RobleDataSource {
    /// Creates a data source for the given backend configuration.
    #[must_use]
    pub fn new(config: &RobleConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            contract: config.contract.clone(),
            access_token: config.access_token.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/database/{}/{action}", self.base_url, self.contract)
    }

    fn request(&self, method: Method, action: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.endpoint(action));
        if let Some(token) = &self.access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }
}

/// Request body for the insert endpoint.
#[derive(Serialize)]
struct InsertRequest<'a> {
    #[serde(rename = "tableName")]
    table_name: &'a str,
    records: Vec<Record>,
}

/// Response from the insert endpoint.
#[derive(Deserialize)]
struct InsertResponse {
    inserted: Vec<Record>,
    #[serde(default)]
    skipped: Vec<Value>,
}

/// Request body for the update endpoint.
#[derive(Serialize)]
struct UpdateRequest<'a> {
    #[serde(rename = "tableName")]
    table_name: &'a str,
    #[serde(rename = "idColumn")]
    id_column: &'a str,
    #[serde(rename = "idValue")]
    id_value: &'a str,
    updates: Record,
}

/// Request body for the delete endpoint.
#[derive(Serialize)]
struct DeleteRequest<'a> {
    #[serde(rename = "tableName")]
    table_name: &'a str,
    #[serde(rename = "idColumn")]
    id_column: &'a str,
    #[serde(rename = "idValue")]
    id_value: &'a str,
}

/// Error response from the Roble API.
#[derive(Deserialize)]
struct RobleError {
    message: Value,
}

/// Sends a request and returns the response body, folding non-2xx statuses
/// into a formatted error carrying the backend's message when parseable.
async fn send(
    builder: RequestBuilder,
    action: &str,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    let response = builder
        .send()
        .await
        .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
            format!("Roble {action} request failed: {e}").into()
        })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
        format!("Failed to read Roble {action} response: {e}").into()
    })?;

    if !status.is_success() {
        let msg = serde_json::from_str::<RobleError>(&body)
            .map(|e| match e.message {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .unwrap_or(body);
        return Err(format!("Roble {action} error ({}): {msg}", status.as_u16()).into());
    }

    Ok(body)
}

fn parse<T: serde::de::DeserializeOwned>(
    body: &str,
    action: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    serde_json::from_str(body).map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
        format!("Failed to parse Roble {action} response: {e}").into()
    })
}

/// Renders a filter value as the query-parameter string Roble expects.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl DataSource for RobleDataSource {
    fn create(&self, collection: &str, record: Record) -> SourceFuture<'_, Record> {
        let collection = collection.to_string();
        Box::pin(async move {
            let body = InsertRequest { table_name: &collection, records: vec![record] };
            let builder = self.request(Method::POST, "insert").json(&body);
            let text = send(builder, "insert").await?;
            let response: InsertResponse = parse(&text, "insert")?;
            response.inserted.into_iter().next().ok_or_else(
                || -> Box<dyn std::error::Error + Send + Sync> {
                    format!(
                        "Roble insert into {collection} stored nothing ({} skipped)",
                        response.skipped.len()
                    )
                    .into()
                },
            )
        })
    }

    fn get_all(&self, collection: &str) -> SourceFuture<'_, Vec<Record>> {
        let collection = collection.to_string();
        Box::pin(async move {
            let builder =
                self.request(Method::GET, "read").query(&[("tableName", collection.as_str())]);
            let text = send(builder, "read").await?;
            parse(&text, "read")
        })
    }

    fn get_by_id(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, Option<Record>> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let builder = self
                .request(Method::GET, "read")
                .query(&[("tableName", collection.as_str()), (ID_FIELD, remote_id.as_str())]);
            let text = send(builder, "read").await?;
            let records: Vec<Record> = parse(&text, "read")?;
            Ok(records.into_iter().next())
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
            let builder = self.request(Method::GET, "read").query(&[
                ("tableName", collection.as_str()),
                (field.as_str(), query_value(&value).as_str()),
            ]);
            let text = send(builder, "read").await?;
            parse(&text, "read")
        })
    }

    fn update(&self, collection: &str, remote_id: &str, changes: Record) -> SourceFuture<'_, ()> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let body = UpdateRequest {
                table_name: &collection,
                id_column: ID_FIELD,
                id_value: &remote_id,
                updates: changes,
            };
            let builder = self.request(Method::PUT, "update").json(&body);
            send(builder, "update").await?;
            Ok(())
        })
    }

    fn delete(&self, collection: &str, remote_id: &str) -> SourceFuture<'_, ()> {
        let collection = collection.to_string();
        let remote_id = remote_id.to_string();
        Box::pin(async move {
            let body = DeleteRequest {
                table_name: &collection,
                id_column: ID_FIELD,
                id_value: &remote_id,
            };
            let builder = self.request(Method::DELETE, "delete").json(&body);
            send(builder, "delete").await?;
            Ok(())
        })
    }
}
