//! Batch matrix concepts: model specs, prompts, and result records

pub mod model_spec;
pub mod prompt;
pub mod record;
