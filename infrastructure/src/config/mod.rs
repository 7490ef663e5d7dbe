//! Configuration file support

pub mod file_config;
pub mod loader;

use promptgrid_domain::DomainError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
///
/// All of these are fatal: a run never starts with a broken config.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] Box<figment::Error>),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}
