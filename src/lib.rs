pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    EmbeddingProvider, EmbeddingResolver, EnrichProfileUseCase, InsertOutcome,
    ProfileRepository, ProfileStoreWriter, SUCCESS_ACK,
};

pub use cli::Commands;

pub use connector::{
    Container, ContainerConfig, GeminiEmbedding, HandleController, InMemoryProfileRepository,
    MockEmbedding, OpenAiEmbedding, PushController, Router, SupabaseProfileRepository,
    DEFAULT_PROFILE_TABLE, GEMINI_DEFAULT_BASE_URL, GEMINI_EMBEDDING_MODEL,
    MOCK_EMBEDDING_MODEL, OPENAI_DEFAULT_BASE_URL, OPENAI_EMBEDDING_MODEL,
};

pub use domain::{
    DomainError, EmbeddingResult, InboundMessage, ProfileRecord, ProviderError, ProviderTier,
    PubsubMessage, UserProfileInput,
};
