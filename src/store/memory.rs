use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::models::{Record, Table};
use crate::store::RecordStore;

/// In-process stand-in for the remote record API. Assigns sequential ids and
/// stamps `created_at` on enrollments the way the deployed store does.
#[derive(Default)]
pub struct MemoryRecordStore {
    rows: Mutex<HashMap<Table, Vec<Record>>>,
    next_id: AtomicI64,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(0),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn list(&self, table: Table) -> Result<Vec<Record>, AppError> {
        let rows = self.rows.lock().await;
        Ok(rows.get(&table).cloned().unwrap_or_default())
    }

    async fn create(&self, table: Table, record: &Record) -> Result<Record, AppError> {
        if record.table() != table {
            return Err(AppError::BadRequest(format!(
                "record does not belong to table {}",
                table
            )));
        }

        let mut stored = record.clone();
        stored.set_id(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        if let Record::Enrollment(enrollment) = &mut stored {
            if enrollment.created_at.is_none() {
                enrollment.created_at = Some(Utc::now().to_rfc3339());
            }
        }

        let mut rows = self.rows.lock().await;
        rows.entry(table).or_default().push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, table: Table, record: &Record) -> Result<(), AppError> {
        let id = record.id().ok_or_else(|| {
            AppError::BadRequest("cannot update a record without an id".to_string())
        })?;

        let mut rows = self.rows.lock().await;
        let list = rows.get_mut(&table).ok_or(AppError::NotFound)?;
        let slot = list
            .iter_mut()
            .find(|row| row.id() == Some(id))
            .ok_or(AppError::NotFound)?;
        *slot = record.clone();
        Ok(())
    }

    async fn delete(&self, table: Table, id: i64) -> Result<(), AppError> {
        let mut rows = self.rows.lock().await;
        let list = rows.get_mut(&table).ok_or(AppError::NotFound)?;
        let before = list.len();
        list.retain(|row| row.id() != Some(id));
        if list.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
