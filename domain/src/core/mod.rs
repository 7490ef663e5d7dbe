//! Core domain concepts shared across the crate

pub mod error;
pub mod message;
