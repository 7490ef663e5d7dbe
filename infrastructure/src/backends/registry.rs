//! Backend registry
//!
//! Maps a configuration key to a factory producing a backend instance.
//! This replaces dynamic symbol resolution: every usable backend is
//! registered up front and looked up by name, so an unresolvable key is
//! caught before any processing starts.

use promptgrid_application::ports::llm_backend::{BackendCatalog, BackendError, LlmBackend};
use promptgrid_domain::ModelSpec;
use std::collections::HashMap;
use std::sync::Arc;

type Factory = Box<dyn Fn(&ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError> + Send + Sync>;

/// Registry of backend factories, keyed by the `backend` field of a
/// [`ModelSpec`]
pub struct BackendRegistry {
    factories: HashMap<String, Factory>,
}

impl BackendRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry pre-populated with the built-in adapters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("echo", |spec| {
            Ok(Arc::new(super::echo::EchoBackend::from_spec(spec)) as Arc<dyn LlmBackend>)
        });
        #[cfg(feature = "http-backends")]
        registry.register("openai", |spec| {
            Ok(Arc::new(super::openai::OpenAiBackend::from_spec(spec)?) as Arc<dyn LlmBackend>)
        });
        registry
    }

    /// Register a factory under a key, replacing any previous entry.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn(&ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError> + Send + Sync + 'static,
    {
        self.factories.insert(key.into(), Box::new(factory));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    /// Registered keys, sorted for stable error messages.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Verify every spec's backend key resolves. Called at startup so a
    /// bad key aborts before any batch is dispatched.
    pub fn ensure_known(&self, specs: &[ModelSpec]) -> Result<(), BackendError> {
        for spec in specs {
            if !self.contains(&spec.backend) {
                return Err(BackendError::UnknownBackend(format!(
                    "'{}' (model '{}'); registered backends: {}",
                    spec.backend,
                    spec.name,
                    self.keys().join(", ")
                )));
            }
        }
        Ok(())
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl BackendCatalog for BackendRegistry {
    fn create_backend(&self, spec: &ModelSpec) -> Result<Arc<dyn LlmBackend>, BackendError> {
        let factory = self
            .factories
            .get(&spec.backend)
            .ok_or_else(|| BackendError::UnknownBackend(spec.backend.clone()))?;
        factory(spec)
    }
}
