use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, ProfileRecord};

/// Row-level access to the profile table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert one row and return the result set reported by the datastore.
    ///
    /// An empty result set is returned as-is; deciding whether that counts as
    /// a failed write is left to the caller.
    async fn insert(&self, record: &ProfileRecord) -> Result<Vec<Value>, DomainError>;
}
