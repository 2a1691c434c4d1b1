use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::ProfileRepository;
use crate::domain::{DomainError, ProfileRecord};

pub const DEFAULT_PROFILE_TABLE: &str = "user_profiles";
const REST_PATH: &str = "/rest/v1";

/// Profile table hosted on Supabase, written through its PostgREST API.
///
/// Inserts ask for `return=representation` so the created rows come back in
/// the response body; the caller decides what an empty body means.
pub struct SupabaseProfileRepository {
    client: reqwest::Client,
    api_key: String,
    /// Full table endpoint (`{base}/rest/v1/{table}`).
    url: String,
}

impl SupabaseProfileRepository {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        table: &str,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(DomainError::initialization(format!(
                "invalid Supabase URL '{}'",
                base_url
            )));
        }

        let api_key: String = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DomainError::initialization("Supabase key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::initialization(format!("failed to build Supabase client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key,
            url: format!("{}{}/{}", base, REST_PATH, table),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn insert(&self, record: &ProfileRecord) -> Result<Vec<Value>, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| DomainError::store_write(format!("insert request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Supabase insert returned {}: {}", status, body);
            return Err(DomainError::store_write(format!(
                "insert returned {}: {}",
                status, body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DomainError::store_write(format!("failed to read insert response: {}", e)))?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let rows = match serde_json::from_str::<Value>(&body) {
            Ok(Value::Array(rows)) => rows,
            Ok(Value::Null) => Vec::new(),
            Ok(row @ Value::Object(_)) => vec![row],
            Ok(other) => {
                return Err(DomainError::store_write(format!(
                    "unexpected insert response: {}",
                    other
                )))
            }
            Err(e) => {
                return Err(DomainError::store_write(format!(
                    "failed to parse insert response: {}",
                    e
                )))
            }
        };

        debug!("Supabase insert returned {} row(s)", rows.len());
        Ok(rows)
    }
}
