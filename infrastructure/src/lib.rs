//! Infrastructure layer for promptgrid
//!
//! This crate contains the backend registry and adapters, configuration
//! file loading, message/prompt input loading, and the CSV result sink.

pub mod backends;
pub mod config;
pub mod inputs;
pub mod outputs;

// Re-export commonly used types
pub use backends::{echo::EchoBackend, registry::BackendRegistry};
pub use config::{
    ConfigError,
    file_config::{FileConfig, InputsConfig, OutputConfig},
    loader::ConfigLoader,
};
pub use inputs::{InputError, messages::load_user_messages, prompts::load_system_prompts};
pub use outputs::csv_sink::CsvResultSink;

#[cfg(feature = "http-backends")]
pub use backends::openai::OpenAiBackend;
