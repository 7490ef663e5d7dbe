//! Result sink port
//!
//! The accumulated record set is serialized once at the very end of a run.
//! A sink failure is fatal; there is no partial-output persistence.

use promptgrid_domain::ResultRecord;
use thiserror::Error;

/// Errors that can occur while writing the result set
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to create output at {path}: {source}")]
    Create {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write results: {0}")]
    WriteFailed(String),
}

/// Destination for the complete result set
pub trait ResultSink {
    fn write_all(&self, records: &[ResultRecord]) -> Result<(), SinkError>;
}
