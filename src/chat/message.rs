//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::changes::CodeChange;

/// Author of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person prompting.
    User,
    /// The code-generation backend.
    Assistant,
}

/// One turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier.
    pub id: String,
    /// Who produced the message.
    pub role: Role,
    /// Raw text, possibly containing a fenced code block.
    pub content: String,
    /// When the message was appended.
    pub timestamp: DateTime<Utc>,
    /// Changes produced by this turn, in order. Empty for user messages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_changes: Vec<CodeChange>,
}

impl ChatMessage {
    /// Returns `true` if this message carries `change`.
    #[must_use]
    pub fn contains_change(&self, change: &CodeChange) -> bool {
        self.code_changes.iter().any(|c| c.same_change(change))
    }
}
