//! Configuration file schema
//!
//! # Example
//!
//! ```toml
//! [[models]]
//! backend = "openai"
//! name = "gpt-4o"
//! concurrency = 8
//! params = { model = "gpt-4o-2024-08-06", temperature = 0.2 }
//!
//! [[models]]
//! backend = "echo"
//! name = "dry-run"
//!
//! [inputs]
//! messages = "data/user_input.csv"
//! prompts = "data/prompts"
//!
//! [output]
//! results = "results/combined_results.csv"
//! ```

use crate::config::ConfigError;
use promptgrid_domain::{ModelSpec, validate_specs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model descriptors, in the order batches are dispatched
    pub models: Vec<ModelSpec>,
    /// Input source locations
    pub inputs: InputsConfig,
    /// Output destination
    pub output: OutputConfig,
}

/// Input source locations (`[inputs]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// CSV file with a `user_message` column
    pub messages: PathBuf,
    /// Directory of `*.txt` system prompt files
    pub prompts: PathBuf,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            messages: PathBuf::from("data/user_input.csv"),
            prompts: PathBuf::from("data/prompts"),
        }
    }
}

/// Output destination (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file receiving the full result set at end of run
    pub results: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results: PathBuf::from("results/combined_results.csv"),
        }
    }
}

impl FileConfig {
    /// Structural validation of the model list: at least one model, every
    /// spec well-formed, display names unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_specs(&self.models)?;
        Ok(())
    }
}
