//! CSV result sink
//!
//! Serializes the complete in-memory record set to a single CSV file at
//! the very end of a run. Creates parent directories as needed. There is
//! no incremental flushing; a failure here loses the run.

use promptgrid_application::ports::result_sink::{ResultSink, SinkError};
use promptgrid_domain::ResultRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// Sink writing `{user_message, system_prompt_file, model_name,
/// llm_response}` rows to a CSV file
pub struct CsvResultSink {
    path: PathBuf,
}

impl CsvResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvResultSink {
    fn write_all(&self, records: &[ResultRecord]) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::Create {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut writer = csv::Writer::from_path(&self.path)
            .map_err(|e| SinkError::WriteFailed(e.to_string()))?;
        for record in records {
            writer
                .serialize(record)
                .map_err(|e| SinkError::WriteFailed(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| SinkError::WriteFailed(e.to_string()))?;

        info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
