//! Domain layer for promptgrid
//!
//! This crate contains the core entities and value objects for a batch
//! comparison run: model specifications, prompts, user messages, and the
//! result records the run produces. It has no dependencies on
//! infrastructure or presentation concerns.

pub mod core;
pub mod matrix;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    message::{ChatMessage, Role},
};
pub use matrix::{
    model_spec::{DEFAULT_CONCURRENCY, ModelSpec, validate_specs},
    prompt::{SystemPrompt, UserMessage},
    record::{ERROR_MARKER, ResultRecord},
};
