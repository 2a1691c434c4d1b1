use std::time::Instant;

use tracing::{error, info};
use uuid::Uuid;

use crate::application::{EmbeddingResolver, ProfileStoreWriter};
use crate::domain::{DomainError, InboundMessage, ProfileRecord, UserProfileInput};

/// Acknowledgement returned when a profile was embedded and stored.
pub const SUCCESS_ACK: &str = "Profile processed and stored successfully.";

const UNKNOWN_USER: &str = "unknown";
const NO_MODEL: &str = "none";

/// Decodes one profile message, embeds it and stores the enriched row.
///
/// Every failure is logged once and returned to the caller, which is expected
/// to hand it back to the transport so the message is redelivered.
pub struct EnrichProfileUseCase {
    resolver: EmbeddingResolver,
    writer: ProfileStoreWriter,
}

impl EnrichProfileUseCase {
    pub fn new(resolver: EmbeddingResolver, writer: ProfileStoreWriter) -> Self {
        Self { resolver, writer }
    }

    /// Parse a raw envelope document and process it.
    pub async fn execute_raw(&self, raw: &str) -> Result<String, DomainError> {
        match InboundMessage::parse(raw) {
            Ok(message) => self.execute(&message).await,
            Err(e) => {
                log_failure(&Uuid::new_v4().to_string(), UNKNOWN_USER, NO_MODEL, &e);
                Err(e)
            }
        }
    }

    pub async fn execute(&self, message: &InboundMessage) -> Result<String, DomainError> {
        let invocation_id = message
            .message_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let mut user_id = UNKNOWN_USER.to_string();
        let mut model_used = NO_MODEL.to_string();
        let start_time = Instant::now();

        let result = self
            .process(message, &invocation_id, &mut user_id, &mut model_used)
            .await;

        match &result {
            Ok(_) => info!(
                event = "orchestrator_success",
                invocation_id = %invocation_id,
                user_id = %user_id,
                model_used = %model_used,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Profile processed and stored"
            ),
            Err(e) => log_failure(&invocation_id, &user_id, &model_used, e),
        }

        result
    }

    async fn process(
        &self,
        message: &InboundMessage,
        invocation_id: &str,
        user_id: &mut String,
        model_used: &mut String,
    ) -> Result<String, DomainError> {
        let profile = UserProfileInput::new(message.decode_payload()?);
        *user_id = profile.user_id();

        info!(
            event = "orchestrator_start",
            invocation_id = %invocation_id,
            user_id = %user_id,
            "Orchestrator started"
        );

        let embedding = self.resolver.resolve(&profile.embedding_text()).await?;
        *model_used = embedding.model.clone();

        let record = ProfileRecord::from_input(&profile, embedding.vector);
        let outcome = self.writer.insert(&record).await?;

        let inserted_id = outcome.inserted_id().unwrap_or_else(|| "-".to_string());
        info!(
            inserted_id = %inserted_id,
            "Stored profile for {} via {} provider ({} row(s))",
            user_id,
            embedding.tier,
            outcome.row_count()
        );

        Ok(SUCCESS_ACK.to_string())
    }
}

fn log_failure(invocation_id: &str, user_id: &str, model_used: &str, e: &DomainError) {
    error!(
        event = "orchestrator_error",
        invocation_id = %invocation_id,
        user_id = %user_id,
        model_used = %model_used,
        error_type = e.kind(),
        error_message = %e,
        permanent = e.is_permanent(),
        "Profile enrichment failed; requesting redelivery"
    );
}
