//! Port definitions (interfaces to infrastructure and presentation)

pub mod llm_backend;
pub mod progress;
pub mod result_sink;
