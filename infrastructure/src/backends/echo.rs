//! Echo backend
//!
//! Returns the user message unchanged. Useful for validating a config and
//! exercising the full pipeline without network calls.

use async_trait::async_trait;
use promptgrid_application::ports::llm_backend::{BackendError, LlmBackend};
use promptgrid_domain::{ChatMessage, ModelSpec, Role};

/// Backend that echoes the user message back
pub struct EchoBackend {
    prefix: Option<String>,
}

impl EchoBackend {
    /// Build from a spec. Honors an optional `prefix` param prepended to
    /// every response.
    pub fn from_spec(spec: &ModelSpec) -> Self {
        Self {
            prefix: spec.param_str("prefix").map(str::to_string),
        }
    }
}

#[async_trait]
impl LlmBackend for EchoBackend {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String, BackendError> {
        let user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        match &self.prefix {
            Some(prefix) => Ok(format!("{prefix}{user}")),
            None => Ok(user.to_string()),
        }
    }
}
