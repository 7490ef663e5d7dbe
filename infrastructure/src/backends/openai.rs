//! OpenAI-compatible chat completions backend
//!
//! Works against any endpoint speaking the `/chat/completions` protocol.
//! Params (from the model spec's `params` table):
//!
//! - `model` (required) — model identifier sent in the request body
//! - `api_base` — base URL, default `https://api.openai.com/v1`
//! - `api_key_env` — environment variable holding the API key, default
//!   `OPENAI_API_KEY`
//! - `temperature` — optional sampling temperature

use async_trait::async_trait;
use promptgrid_application::ports::llm_backend::{BackendError, LlmBackend};
use promptgrid_domain::{ChatMessage, ModelSpec, Role};
use serde_json::json;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_KEY_ENV: &str = "OPENAI_API_KEY";

/// Backend speaking the OpenAI chat completions protocol
pub struct OpenAiBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f64>,
}

impl OpenAiBackend {
    /// Build from a spec. The API key is read from the environment once,
    /// at instantiation; a missing key fails the run before any request.
    pub fn from_spec(spec: &ModelSpec) -> Result<Self, BackendError> {
        let model = spec.param_str("model").ok_or_else(|| {
            BackendError::InvalidParams(format!(
                "model '{}': 'model' param is required for the openai backend",
                spec.name
            ))
        })?;

        let api_base = spec
            .param_str("api_base")
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/');
        let key_env = spec.param_str("api_key_env").unwrap_or(DEFAULT_KEY_ENV);
        let api_key = std::env::var(key_env).map_err(|_| {
            BackendError::MissingCredentials(format!(
                "environment variable {key_env} is not set (model '{}')",
                spec.name
            ))
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("{api_base}/chat/completions"),
            api_key,
            model: model.to_string(),
            temperature: spec.param_f64("temperature"),
        })
    }

    fn request_body(&self, messages: &[ChatMessage]) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = messages
            .iter()
            .map(|m| {
                json!({
                    "role": wire_role(m.role),
                    "content": m.content,
                })
            })
            .collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }
}

fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System => "system",
        Role::User => "user",
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn invoke(&self, messages: &[ChatMessage]) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::RequestFailed(format!(
                "{status}: {}",
                body.trim()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| BackendError::MalformedResponse(e.to_string()))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                BackendError::MalformedResponse(
                    "response has no choices[0].message.content".to_string(),
                )
            })
    }
}
