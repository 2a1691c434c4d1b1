use async_trait::async_trait;

use crate::domain::ProviderError;

/// A single text-embedding backend.
///
/// One call is one outbound request: implementations do not retry. Falling
/// back to another backend is the resolver's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Model identifier reported as `model_used`.
    fn model_name(&self) -> String;
}
