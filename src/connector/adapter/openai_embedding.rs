use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::EmbeddingProvider;
use crate::domain::{DomainError, ProviderError};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const OPENAI_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const EMBEDDINGS_PATH: &str = "/v1/embeddings";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Secondary provider: OpenAI `/v1/embeddings`.
///
/// Only constructed when `OPENAI_API_KEY` is present. `OPENAI_BASE_URL`
/// points it at a compatible server instead of `https://api.openai.com`.
pub struct OpenAiEmbedding {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiEmbedding {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), EMBEDDINGS_PATH);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::initialization(format!("failed to build OpenAI client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: OPENAI_EMBEDDING_MODEL.to_string(),
            url,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, body));
        }

        let parsed: EmbeddingResponse = response.json().await?;
        let vector = parsed
            .data
            .into_iter()
            .min_by_key(|d| d.index)
            .map(|d| d.embedding)
            .filter(|embedding| !embedding.is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("OpenAI response has no embedding data".into())
            })?;

        debug!("OpenAI returned {} dimensions", vector.len());
        Ok(vector)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
