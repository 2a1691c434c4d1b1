use thiserror::Error;

/// Failure of a single embedding backend.
///
/// These never leave the resolver on their own: the resolver either recovers
/// by falling back to the next provider or wraps the last one into
/// [`DomainError::AllProvidersFailed`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication rejected ({status}): {body}")]
    Auth { status: u16, body: String },

    #[error("quota exceeded ({status}): {body}")]
    Quota { status: u16, body: String },

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Classify a non-success HTTP status returned by a provider.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::Auth { status, body },
            429 => Self::Quota { status, body },
            _ => Self::Api { status, body },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport",
            Self::Auth { .. } => "Auth",
            Self::Quota { .. } => "Quota",
            Self::Api { .. } => "Api",
            Self::MalformedResponse(_) => "MalformedResponse",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("All embedding providers failed: {0}")]
    AllProvidersFailed(String),

    #[error("No embedding providers configured")]
    NoProvidersConfigured,

    #[error("Store write error: {0}")]
    StoreWrite(String),

    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl DomainError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn store_write(msg: impl Into<String>) -> Self {
        Self::StoreWrite(msg.into())
    }

    pub fn initialization(msg: impl Into<String>) -> Self {
        Self::Initialization(msg.into())
    }

    /// Value reported as `error_type` in structured failure logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DecodeError",
            Self::AllProvidersFailed(_) => "AllProvidersFailedError",
            Self::NoProvidersConfigured => "NoProvidersConfiguredError",
            Self::StoreWrite(_) => "StoreWriteError",
            Self::Initialization(_) => "InitializationError",
        }
    }

    /// A permanent failure will fail identically on every redelivery.
    ///
    /// Redelivery is still requested for these; the flag only changes the
    /// status code reported to the transport and the log record.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    pub fn is_store_write(&self) -> bool {
        matches!(self, Self::StoreWrite(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Decode(format!("invalid JSON: {}", err))
    }
}
