use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::EmbeddingProvider;
use crate::domain::{DomainError, EmbeddingResult, ProviderTier};

/// Produces an embedding from the first provider that succeeds.
///
/// The primary provider is always tried first. The secondary is only called
/// after the primary failed (or when no primary is configured), and each
/// provider gets exactly one attempt.
pub struct EmbeddingResolver {
    primary: Option<Arc<dyn EmbeddingProvider>>,
    secondary: Option<Arc<dyn EmbeddingProvider>>,
}

impl EmbeddingResolver {
    pub fn new(
        primary: Option<Arc<dyn EmbeddingProvider>>,
        secondary: Option<Arc<dyn EmbeddingProvider>>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub fn has_providers(&self) -> bool {
        self.primary.is_some() || self.secondary.is_some()
    }

    pub async fn resolve(&self, text: &str) -> Result<EmbeddingResult, DomainError> {
        let mut primary_failure = None;

        if let Some(primary) = &self.primary {
            let model = primary.model_name();
            info!("Embedding with primary provider {}", model);

            match primary.embed(text).await {
                Ok(vector) => {
                    debug!("Primary provider {} returned {} dimensions", model, vector.len());
                    return Ok(EmbeddingResult::new(vector, ProviderTier::Primary, model));
                }
                Err(e) => {
                    warn!(
                        event = "primary_provider_failed",
                        model = %model,
                        error_type = e.kind(),
                        error_message = %e,
                        "Primary embedding provider failed with {}; falling back",
                        e.kind()
                    );
                    primary_failure = Some(format!("{} ({}): {}", model, e.kind(), e));
                }
            }
        }

        let Some(secondary) = &self.secondary else {
            return Err(match primary_failure {
                Some(reason) => DomainError::AllProvidersFailed(format!(
                    "{}; no secondary provider configured",
                    reason
                )),
                None => DomainError::NoProvidersConfigured,
            });
        };

        let model = secondary.model_name();
        info!("Embedding with secondary provider {}", model);

        match secondary.embed(text).await {
            Ok(vector) => {
                info!("Secondary provider {} succeeded (fallback)", model);
                Ok(EmbeddingResult::new(vector, ProviderTier::Secondary, model))
            }
            Err(e) => {
                let secondary_failure = format!("{} ({}): {}", model, e.kind(), e);
                Err(DomainError::AllProvidersFailed(match primary_failure {
                    Some(reason) => format!("{}; {}", reason, secondary_failure),
                    None => secondary_failure,
                }))
            }
        }
    }
}
