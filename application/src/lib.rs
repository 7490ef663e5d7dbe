//! Application layer for promptgrid
//!
//! This crate contains the use cases and port definitions. It depends only
//! on the domain layer; backend adapters, file IO, and progress display
//! live behind the ports defined here.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    llm_backend::{BackendCatalog, BackendError, LlmBackend},
    progress::{NoProgress, ProgressNotifier},
    result_sink::{ResultSink, SinkError},
};
pub use use_cases::run_matrix::{RunMatrixError, RunMatrixInput, RunMatrixUseCase};
