use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ProfileRepository;
use crate::domain::{DomainError, ProfileRecord};

/// Process-local profile table for dry runs and tests.
///
/// Like the hosted table it hands back the inserted row, with a sequential
/// `id` column added.
pub struct InMemoryProfileRepository {
    rows: Arc<Mutex<Vec<ProfileRecord>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn records(&self) -> Vec<ProfileRecord> {
        self.rows.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.rows.lock().await.len()
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn insert(&self, record: &ProfileRecord) -> Result<Vec<Value>, DomainError> {
        let mut rows = self.rows.lock().await;
        rows.push(record.clone());

        let mut row = serde_json::to_value(record)
            .map_err(|e| DomainError::store_write(format!("failed to serialize row: {}", e)))?;
        if let Value::Object(map) = &mut row {
            map.insert("id".to_string(), Value::from(rows.len() as u64));
        }

        debug!("Stored profile {} in memory ({} rows)", record.email, rows.len());
        Ok(vec![row])
    }
}
