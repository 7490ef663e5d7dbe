//! Prompt and user message value objects

use serde::{Deserialize, Serialize};

/// A single user message (Value Object)
///
/// Constructed through [`UserMessage::new`], which rejects blank input so
/// empty rows in the message source never enter a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMessage(String);

impl UserMessage {
    /// Create a message, returning `None` for blank/whitespace-only text.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A system prompt paired with every user message during processing
///
/// The identifier is the source file name without its extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemPrompt {
    id: String,
    text: String,
}

impl SystemPrompt {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
