use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tracing::info;

use crate::DomainError;

use super::super::{Container, ContainerConfig};

/// Pub/Sub push endpoint.
///
/// Any non-2xx answer is a negative acknowledgement, so every failure below
/// leads to redelivery. Permanent failures are reported as `400` only to make
/// them stand out in the subscription metrics.
pub struct PushController {
    config: Arc<ContainerConfig>,
}

impl PushController {
    pub fn new(config: &ContainerConfig) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }

    pub fn app(&self) -> axum::Router {
        axum::Router::new()
            .route("/", post(receive))
            .route("/healthz", get(health))
            .with_state(self.config.clone())
    }

    pub async fn serve(&self, host: String, port: u16) -> Result<String> {
        let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Listening for push deliveries on http://{}", listener.local_addr()?);

        axum::serve(listener, self.app())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok("Push endpoint stopped.".to_string())
    }
}

async fn receive(State(config): State<Arc<ContainerConfig>>, body: String) -> (StatusCode, String) {
    let container = match Container::for_invocation(&config) {
        Ok(container) => container,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match container.enrich_use_case().execute_raw(&body).await {
        Ok(ack) => (StatusCode::OK, ack),
        Err(e) => (status_for(&e), e.to_string()),
    }
}

async fn health() -> &'static str {
    "ok"
}

fn status_for(error: &DomainError) -> StatusCode {
    if error.is_permanent() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
