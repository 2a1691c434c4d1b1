use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::application::ProfileRepository;
use crate::domain::{DomainError, ProfileRecord};

/// Rows the datastore reported back for a successful insert.
#[derive(Debug, Clone)]
pub struct InsertOutcome {
    rows: Vec<Value>,
}

impl InsertOutcome {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Primary key of the first inserted row, when the table exposes one.
    pub fn inserted_id(&self) -> Option<String> {
        self.rows.first()?.get("id").map(|id| match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Writes one profile row per call and verifies the datastore accepted it.
pub struct ProfileStoreWriter {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileStoreWriter {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn insert(&self, record: &ProfileRecord) -> Result<InsertOutcome, DomainError> {
        let rows = self.repository.insert(record).await?;

        // A write the datastore silently dropped comes back as an empty set.
        if rows.is_empty() {
            return Err(DomainError::store_write(format!(
                "insert for {} returned no rows",
                record.email
            )));
        }

        debug!("Inserted {} profile row(s) for {}", rows.len(), record.email);
        Ok(InsertOutcome { rows })
    }
}
