//! Model specification value object
//!
//! A [`ModelSpec`] identifies one configured backend: the registry key it
//! is built from, a display name for result records, free-form
//! instantiation params, and the per-batch concurrency limit.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Concurrency limit used when a spec does not set one.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// One configured model (Value Object)
///
/// Loaded once at startup and immutable thereafter. The `backend` field
/// names a factory in the backend registry; `params` is passed verbatim
/// to that factory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Registry key of the backend adapter (e.g. "openai", "echo")
    pub backend: String,
    /// Display name recorded in every result row
    pub name: String,
    /// Free-form instantiation parameters for the backend factory
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,
    /// Maximum concurrent invocations within one batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl ModelSpec {
    pub fn new(backend: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            name: name.into(),
            params: BTreeMap::new(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Look up a string-valued param.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Look up a float-valued param.
    pub fn param_f64(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(|v| v.as_f64())
    }

    /// Check structural validity. Called once at config load; a spec that
    /// fails here aborts the run before any processing.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.backend.trim().is_empty() {
            return Err(DomainError::InvalidModelSpec(format!(
                "model '{}': backend key cannot be empty",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidModelSpec(
                "model display name cannot be empty".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(DomainError::InvalidModelSpec(format!(
                "model '{}': concurrency must be at least 1",
                self.name
            )));
        }
        Ok(())
    }
}

/// Validate a full spec list: every spec structurally valid, display names
/// unique (result rows are keyed by name, so duplicates would collide).
pub fn validate_specs(specs: &[ModelSpec]) -> Result<(), DomainError> {
    if specs.is_empty() {
        return Err(DomainError::NoModels);
    }
    let mut seen = std::collections::BTreeSet::new();
    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.name.as_str()) {
            return Err(DomainError::DuplicateModelName(spec.name.clone()));
        }
    }
    Ok(())
}
