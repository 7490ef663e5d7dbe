//! Result record value object
//!
//! One [`ResultRecord`] exists for every (user message, prompt, model)
//! triple by the end of a run. The set is append-only; records are never
//! edited after creation.

use serde::{Deserialize, Serialize};

/// Prefix marking a failed invocation in the `llm_response` column.
pub const ERROR_MARKER: &str = "ERROR: ";

/// One output row capturing a single message/prompt/model outcome
///
/// Field order matches the CSV column order of the results file:
/// `user_message, system_prompt_file, model_name, llm_response`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// The user message text, exactly as submitted
    pub user_message: String,
    /// Identifier of the originating prompt (file stem)
    pub system_prompt_file: String,
    /// Display name of the model that produced the response
    pub model_name: String,
    /// The response text, or an error marker for a failed invocation
    pub llm_response: String,
}

impl ResultRecord {
    /// Record a successful invocation.
    pub fn success(
        user_message: impl Into<String>,
        prompt_id: impl Into<String>,
        model_name: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            system_prompt_file: prompt_id.into(),
            model_name: model_name.into(),
            llm_response: response.into(),
        }
    }

    /// Record a failed invocation. The error message is captured inline in
    /// the response column; the batch it belongs to is unaffected.
    pub fn failure(
        user_message: impl Into<String>,
        prompt_id: impl Into<String>,
        model_name: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        Self {
            user_message: user_message.into(),
            system_prompt_file: prompt_id.into(),
            model_name: model_name.into(),
            llm_response: format!("{ERROR_MARKER}{error}"),
        }
    }

    /// Whether this record captured a failed invocation.
    pub fn is_error(&self) -> bool {
        self.llm_response.starts_with(ERROR_MARKER)
    }
}
