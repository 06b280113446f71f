use std::sync::Arc;

use tracing::info;

use crate::editor::EditSession;
use crate::error::AppError;
use crate::lists::ListCache;
use crate::models::{Record, Table};
use crate::store::RecordStore;

/// Glue between the edit state, the record store and the cached lists.
///
/// After every mutation the affected table is re-fetched from the store
/// rather than patched locally, so the lists always reflect what the store
/// actually holds.
pub struct AdminService {
    store: Arc<dyn RecordStore>,
    lists: Arc<ListCache>,
}

impl AdminService {
    pub fn new(store: Arc<dyn RecordStore>, lists: Arc<ListCache>) -> Self {
        Self { store, lists }
    }

    pub async fn refresh(&self, table: Table) -> Result<Vec<Record>, AppError> {
        self.lists.refresh(self.store.as_ref(), table).await
    }

    /// Opens an edit session over the current store row for the given id.
    pub async fn edit(&self, table: Table, id: i64) -> Result<EditSession, AppError> {
        let rows = self.store.list(table).await?;
        let record = rows
            .into_iter()
            .find(|row| row.id() == Some(id))
            .ok_or(AppError::NotFound)?;
        Ok(EditSession::for_edit(record))
    }

    /// Flushes an edit session: create when the draft has no id, full-replace
    /// update otherwise, then re-fetch the table.
    pub async fn save(&self, session: EditSession) -> Result<Record, AppError> {
        let table = session.table();
        let record = session.into_record();

        let saved = match record.id() {
            Some(id) => {
                self.store.update(table, &record).await?;
                info!("updated {} record {}", table, id);
                record
            }
            None => {
                let created = self.store.create(table, &record).await?;
                info!("created {} record {:?}", table, created.id());
                created
            }
        };

        self.refresh(table).await?;
        Ok(saved)
    }

    pub async fn delete(&self, table: Table, id: i64) -> Result<(), AppError> {
        self.store.delete(table, id).await?;
        info!("deleted {} record {}", table, id);
        self.refresh(table).await?;
        Ok(())
    }
}
