pub mod memory;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;
use crate::models::{Record, Table};

pub use memory::MemoryRecordStore;

/// CRUD access to the remote record API, one table per call.
///
/// All four operations are single fire-and-forget HTTP calls: no retries,
/// no idempotency keys, no optimistic-concurrency check.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list(&self, table: Table) -> Result<Vec<Record>, AppError>;
    /// The store assigns the id; the returned record carries it.
    async fn create(&self, table: Table, record: &Record) -> Result<Record, AppError>;
    /// Full replace, not a partial patch. The record must already have an id.
    async fn update(&self, table: Table, record: &Record) -> Result<(), AppError>;
    async fn delete(&self, table: Table, id: i64) -> Result<(), AppError>;
}

/// Talks to the deployed record API: one base URL, the table name as a query
/// parameter, HTTP verb picks the operation.
pub struct HttpRecordStore {
    client: Client,
    base_url: String,
}

impl HttpRecordStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}?table={}", self.base_url, table)
    }

    async fn read_body(response: reqwest::Response) -> Result<serde_json::Value, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "record api error {}: {}",
                status, body
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse record api response: {}", e)))
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn list(&self, table: Table) -> Result<Vec<Record>, AppError> {
        let response = self
            .client
            .get(self.table_url(table))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("list {} failed: {}", table, e)))?;

        let body = Self::read_body(response).await?;
        let rows: Vec<serde_json::Value> = serde_json::from_value(body).map_err(|e| {
            AppError::Upstream(format!("list {} returned a non-array body: {}", table, e))
        })?;

        rows.into_iter()
            .map(|row| {
                Record::from_value(table, row)
                    .map_err(|e| AppError::Upstream(format!("bad {} row: {}", table, e)))
            })
            .collect()
    }

    async fn create(&self, table: Table, record: &Record) -> Result<Record, AppError> {
        let response = self
            .client
            .post(self.table_url(table))
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("create in {} failed: {}", table, e)))?;

        let body = Self::read_body(response).await?;
        Record::from_value(table, body)
            .map_err(|e| AppError::Upstream(format!("bad created {} row: {}", table, e)))
    }

    async fn update(&self, table: Table, record: &Record) -> Result<(), AppError> {
        if record.id().is_none() {
            return Err(AppError::BadRequest(
                "cannot update a record without an id".to_string(),
            ));
        }

        let response = self
            .client
            .put(self.table_url(table))
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("update in {} failed: {}", table, e)))?;

        Self::read_body(response).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, id: i64) -> Result<(), AppError> {
        let response = self
            .client
            .delete(self.table_url(table))
            .json(&serde_json::json!({ "id": id }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("delete in {} failed: {}", table, e)))?;

        Self::read_body(response).await?;
        Ok(())
    }
}
