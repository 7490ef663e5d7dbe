//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid model spec: {0}")]
    InvalidModelSpec(String),

    #[error("Duplicate model name: {0}")]
    DuplicateModelName(String),

    #[error("No models configured")]
    NoModels,
}
