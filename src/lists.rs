use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{Record, Table};
use crate::store::RecordStore;

/// In-memory list per record kind, refreshed from the record store.
///
/// A refresh replaces the whole slot on success and leaves the previous
/// snapshot untouched on failure. Concurrent refreshes are not serialized;
/// whichever completes last wins the slot.
#[derive(Default)]
pub struct ListCache {
    courses: RwLock<Vec<Record>>,
    instructors: RwLock<Vec<Record>>,
    enrollments: RwLock<Vec<Record>>,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, table: Table) -> &RwLock<Vec<Record>> {
        match table {
            Table::Courses => &self.courses,
            Table::Instructors => &self.instructors,
            Table::Enrollments => &self.enrollments,
        }
    }

    pub async fn refresh(
        &self,
        store: &dyn RecordStore,
        table: Table,
    ) -> Result<Vec<Record>, AppError> {
        let rows = store.list(table).await?;
        *self.slot(table).write().await = rows.clone();
        Ok(rows)
    }

    pub async fn snapshot(&self, table: Table) -> Vec<Record> {
        self.slot(table).read().await.clone()
    }
}
