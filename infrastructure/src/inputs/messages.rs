//! User message loading
//!
//! Messages come from a CSV file with a `user_message` column. Blank and
//! whitespace-only entries are dropped so they count toward neither the
//! iteration total nor the output.

use super::InputError;
use promptgrid_domain::UserMessage;
use std::path::Path;
use tracing::info;

/// Column holding the message text.
const MESSAGE_COLUMN: &str = "user_message";

/// Load all non-blank user messages from a CSV file.
pub fn load_user_messages(path: &Path) -> Result<Vec<UserMessage>, InputError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| InputError::Messages {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = reader.headers().map_err(|source| InputError::Messages {
        path: path.to_path_buf(),
        source,
    })?;
    let column = headers
        .iter()
        .position(|h| h == MESSAGE_COLUMN)
        .ok_or_else(|| InputError::MissingColumn {
            path: path.to_path_buf(),
            column: MESSAGE_COLUMN.to_string(),
        })?;

    let mut messages = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| InputError::Messages {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(message) = record.get(column).and_then(UserMessage::new) {
            messages.push(message);
        }
    }

    info!("Loaded {} user messages from {}", messages.len(), path.display());
    Ok(messages)
}
