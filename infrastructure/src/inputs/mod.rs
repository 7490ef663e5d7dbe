//! Input source loading: user messages and system prompts

pub mod messages;
pub mod prompts;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading input sources
///
/// All of these are fatal; inputs are loaded once, before processing.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read messages from {path}: {source}")]
    Messages { path: PathBuf, source: csv::Error },

    #[error("Message source {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Prompt directory not found: {0}")]
    PromptDirMissing(PathBuf),

    #[error("Failed to read prompt file {path}: {source}")]
    PromptRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid prompt glob pattern {pattern}: {source}")]
    PromptPattern {
        pattern: String,
        source: glob::PatternError,
    },
}
