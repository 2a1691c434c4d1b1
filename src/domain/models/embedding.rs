use serde::{Deserialize, Serialize};

/// Position of a provider in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTier {
    Primary,
    Secondary,
}

impl ProviderTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderTier::Primary => "primary",
            ProviderTier::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for ProviderTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vector produced for one profile together with the provider that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub vector: Vec<f32>,
    pub tier: ProviderTier,
    pub model: String,
}

impl EmbeddingResult {
    pub fn new(vector: Vec<f32>, tier: ProviderTier, model: impl Into<String>) -> Self {
        Self {
            vector,
            tier,
            model: model.into(),
        }
    }
}
