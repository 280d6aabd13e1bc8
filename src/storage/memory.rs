//! In-process record store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::PropertyRecord;
use crate::storage::RecordStore;

/// Record store holding everything in a map. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<u64, PropertyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, id: u64) -> Result<Option<PropertyRecord>> {
        let records = self
            .records
            .read()
            .map_err(|e| AppError::store(format!("lock poisoned: {e}")))?;
        Ok(records.get(&id).cloned())
    }

    async fn put(&self, record: &PropertyRecord) -> Result<()> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AppError::store(format!("lock poisoned: {e}")))?;
        records.insert(record.id, record.clone());
        Ok(())
    }
}
