use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::application::{
    EmbeddingProvider, EmbeddingResolver, EnrichProfileUseCase, ProfileRepository,
    ProfileStoreWriter,
};
use crate::domain::DomainError;
use crate::{
    GeminiEmbedding, InMemoryProfileRepository, MockEmbedding, OpenAiEmbedding,
    SupabaseProfileRepository, DEFAULT_PROFILE_TABLE, GEMINI_DEFAULT_BASE_URL,
    OPENAI_DEFAULT_BASE_URL,
};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, read once at startup.
///
/// | Variable                            | Default                                     |
/// |-------------------------------------|---------------------------------------------|
/// | `SUPABASE_URL`                      | required when an invocation starts          |
/// | `SUPABASE_KEY`                      | required when an invocation starts          |
/// | `SUPABASE_TABLE`                    | `user_profiles`                             |
/// | `GEMINI_API_KEY` / `GOOGLE_API_KEY` | unset disables the primary provider         |
/// | `GEMINI_BASE_URL`                   | `https://generativelanguage.googleapis.com` |
/// | `OPENAI_API_KEY`                    | unset disables the secondary provider       |
/// | `OPENAI_BASE_URL`                   | `https://api.openai.com`                    |
/// | `PROFILE_HTTP_TIMEOUT_SECS`         | `30`                                        |
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub table: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub http_timeout: Duration,
    /// Replace the primary provider with the deterministic local embedder.
    pub mock_embeddings: bool,
    /// Write to a per-invocation in-memory table instead of Supabase.
    pub memory_storage: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            table: DEFAULT_PROFILE_TABLE.to_string(),
            gemini_api_key: None,
            gemini_base_url: GEMINI_DEFAULT_BASE_URL.to_string(),
            openai_api_key: None,
            openai_base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            mock_embeddings: false,
            memory_storage: false,
        }
    }
}

impl ContainerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_timeout = match get("PROFILE_HTTP_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "Invalid PROFILE_HTTP_TIMEOUT_SECS '{}', using {}s",
                        raw, DEFAULT_HTTP_TIMEOUT_SECS
                    );
                    defaults.http_timeout
                }
            },
            None => defaults.http_timeout,
        };

        Self {
            supabase_url: get("SUPABASE_URL"),
            supabase_key: get("SUPABASE_KEY"),
            table: get("SUPABASE_TABLE").unwrap_or(defaults.table),
            gemini_api_key: get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            http_timeout,
            mock_embeddings: false,
            memory_storage: false,
        }
    }

    pub fn with_mock_embeddings(mut self, enabled: bool) -> Self {
        self.mock_embeddings = enabled;
        self
    }

    pub fn with_memory_storage(mut self, enabled: bool) -> Self {
        self.memory_storage = enabled;
        self
    }
}

/// Handles for a single invocation.
///
/// Built fresh for every message so no client or credential outlives the
/// invocation that created it.
pub struct Container {
    primary: Option<Arc<dyn EmbeddingProvider>>,
    secondary: Option<Arc<dyn EmbeddingProvider>>,
    profile_repo: Arc<dyn ProfileRepository>,
}

impl Container {
    pub fn new(config: &ContainerConfig) -> Result<Self, DomainError> {
        let profile_repo: Arc<dyn ProfileRepository> = if config.memory_storage {
            debug!("Using in-memory profile storage");
            Arc::new(InMemoryProfileRepository::new())
        } else {
            let url = config
                .supabase_url
                .as_deref()
                .ok_or_else(|| DomainError::initialization("SUPABASE_URL is not set"))?;
            let key = config
                .supabase_key
                .as_deref()
                .ok_or_else(|| DomainError::initialization("SUPABASE_KEY is not set"))?;
            Arc::new(SupabaseProfileRepository::new(
                url,
                key,
                &config.table,
                config.http_timeout,
            )?)
        };

        let primary: Option<Arc<dyn EmbeddingProvider>> = if config.mock_embeddings {
            debug!("Using mock embedding provider as primary");
            Some(Arc::new(MockEmbedding::new()))
        } else if let Some(key) = config.gemini_api_key.as_deref() {
            Some(Arc::new(GeminiEmbedding::new(
                key,
                config.gemini_base_url.as_str(),
                config.http_timeout,
            )?))
        } else {
            debug!("No Gemini key configured; primary provider disabled");
            None
        };

        let secondary: Option<Arc<dyn EmbeddingProvider>> = match config.openai_api_key.as_deref()
        {
            Some(key) => Some(Arc::new(OpenAiEmbedding::new(
                key,
                config.openai_base_url.as_str(),
                config.http_timeout,
            )?)),
            None => {
                debug!("No OpenAI key configured; fallback provider disabled");
                None
            }
        };

        Ok(Self {
            primary,
            secondary,
            profile_repo,
        })
    }

    /// Build the invocation's container, logging a construction failure as
    /// critical before handing it back for redelivery.
    pub fn for_invocation(config: &ContainerConfig) -> Result<Self, DomainError> {
        Self::new(config).map_err(|e| {
            error!(
                event = "orchestrator_init_failure",
                severity = "CRITICAL",
                error_type = e.kind(),
                error_message = %e,
                "Critical initialization failure; requesting redelivery"
            );
            e
        })
    }

    pub fn enrich_use_case(&self) -> EnrichProfileUseCase {
        EnrichProfileUseCase::new(
            EmbeddingResolver::new(self.primary.clone(), self.secondary.clone()),
            ProfileStoreWriter::new(self.profile_repo.clone()),
        )
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> ContainerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ContainerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);

        assert_eq!(config.table, "user_profiles");
        assert_eq!(config.gemini_base_url, GEMINI_DEFAULT_BASE_URL);
        assert_eq!(config.openai_base_url, OPENAI_DEFAULT_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_blank_values_are_unset_and_google_key_is_accepted() {
        let config = config(&[
            ("OPENAI_API_KEY", "  "),
            ("GOOGLE_API_KEY", "g-key"),
            ("PROFILE_HTTP_TIMEOUT_SECS", "abc"),
        ]);

        assert!(config.openai_api_key.is_none());
        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_datastore_settings_fail_initialization() {
        let err = Container::for_invocation(&config(&[("GEMINI_API_KEY", "g")]))
            .err()
            .unwrap();

        assert!(matches!(err, DomainError::Initialization(_)));
        assert_eq!(err.kind(), "InitializationError");
    }

    #[test]
    fn test_missing_secondary_key_disables_fallback_only() {
        let container = Container::new(&config(&[
            ("SUPABASE_URL", "https://project.supabase.co"),
            ("SUPABASE_KEY", "service-key"),
            ("GEMINI_API_KEY", "g"),
        ]))
        .unwrap();

        assert!(container.has_primary());
        assert!(!container.has_secondary());
    }

    #[test]
    fn test_memory_storage_needs_no_datastore_settings() {
        let container = Container::new(
            &config(&[])
                .with_memory_storage(true)
                .with_mock_embeddings(true),
        )
        .unwrap();

        assert!(container.has_primary());
        assert!(!container.has_secondary());
    }
}
