//! LLM backend port
//!
//! Defines how the application layer talks to configured model backends.
//! Adapters and the registry that instantiates them live in the
//! infrastructure layer.

use async_trait::async_trait;
use promptgrid_domain::{ChatMessage, ModelSpec};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while creating or invoking a backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Invalid backend params: {0}")]
    InvalidParams(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// A configured model callable
///
/// One instance is created per (prompt, model) batch and shared by that
/// batch's invocation tasks. A single call accepts the ordered
/// system/user exchange and returns the generated text.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String, BackendError>;
}

/// Factory port resolving a [`ModelSpec`] to a backend instance
///
/// The infrastructure implementation is a registry keyed by the spec's
/// `backend` field. An unresolvable key is a configuration error, not a
/// per-invocation one: it aborts the run.
pub trait BackendCatalog: Send + Sync {
    fn create_backend(&self, spec: &ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError>;
}
