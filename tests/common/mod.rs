//! Fake HTTP backends standing in for Gemini, OpenAI and PostgREST.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use serde_json::Value;

use profile_enricher::ContainerConfig;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    response: Value,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// A server that records every request and answers with a canned response.
pub struct FakeBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    pub async fn start(status: StatusCode, response: Value) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            status,
            response,
            requests: requests.clone(),
        };

        let app = axum::Router::new().fallback(record).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend");
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }
}

async fn record(
    State(state): State<BackendState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(RecordedRequest {
            path: uri.path().to_string(),
            headers,
            body,
        });

    (state.status, Json(state.response.clone()))
}

/// The three collaborators of one invocation.
pub struct Backends {
    pub gemini: FakeBackend,
    pub openai: FakeBackend,
    pub supabase: FakeBackend,
}

impl Backends {
    pub fn config(&self) -> ContainerConfig {
        ContainerConfig {
            supabase_url: Some(self.supabase.url.clone()),
            supabase_key: Some("s-key".to_string()),
            gemini_api_key: Some("g-key".to_string()),
            gemini_base_url: self.gemini.url.clone(),
            openai_api_key: Some("o-key".to_string()),
            openai_base_url: self.openai.url.clone(),
            ..ContainerConfig::default()
        }
    }
}
