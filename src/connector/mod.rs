//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Embedding providers (Gemini primary, OpenAI fallback, mock for local runs)
//! - Profile storage (Supabase PostgREST, in-memory for dry runs)
//! - Entry points (Pub/Sub push endpoint and one-shot handling)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
