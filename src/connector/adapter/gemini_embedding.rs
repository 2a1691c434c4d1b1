use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::EmbeddingProvider;
use crate::domain::{DomainError, ProviderError};

pub const GEMINI_DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_EMBEDDING_MODEL: &str = "text-embedding-004";
const TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
    task_type: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

/// Primary provider: Gemini `embedContent` on the Generative Language API.
///
/// Configuration comes from the environment:
///
/// | Variable                            | Default                                     |
/// |-------------------------------------|---------------------------------------------|
/// | `GEMINI_API_KEY` / `GOOGLE_API_KEY` | none; the provider is disabled without one  |
/// | `GEMINI_BASE_URL`                   | `https://generativelanguage.googleapis.com` |
pub struct GeminiEmbedding {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl GeminiEmbedding {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let model = GEMINI_EMBEDDING_MODEL.to_string();
        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            base.trim_end_matches('/'),
            model
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::initialization(format!("failed to build Gemini client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model,
            url,
        })
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.model),
            content: Content {
                parts: vec![Part { text }],
            },
            task_type: TASK_TYPE,
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(status, body));
        }

        let parsed: EmbedContentResponse = response.json().await?;
        let values = parsed
            .embedding
            .map(|e| e.values)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("Gemini response has no embedding values".into())
            })?;

        debug!("Gemini returned {} dimensions", values.len());
        Ok(values)
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
