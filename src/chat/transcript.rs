//! Append-only chat transcript.

use chrono::{DateTime, Utc};

use super::message::{ChatMessage, Role};
use crate::changes::{self, CodeChange};

/// Ordered log of chat turns for one session.
///
/// Messages are only ever appended, in submission/response order.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user prompt.
    pub fn push_user(
        &mut self,
        id: String,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &ChatMessage {
        self.push(ChatMessage {
            id,
            role: Role::User,
            content: content.into(),
            timestamp,
            code_changes: Vec::new(),
        })
    }

    /// Appends an assistant response with the changes it produced.
    pub fn push_assistant(
        &mut self,
        id: String,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
        code_changes: Vec<CodeChange>,
    ) -> &ChatMessage {
        self.push(ChatMessage { id, role: Role::Assistant, content: content.into(), timestamp, code_changes })
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// All messages in order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Every change in the transcript, newest first.
    #[must_use]
    pub fn changes_newest_first(&self) -> Vec<CodeChange> {
        let mut all: Vec<CodeChange> =
            self.messages.iter().flat_map(|m| m.code_changes.iter().cloned()).collect();
        changes::sort_newest_first(&mut all);
        all
    }

    /// Finds the message that produced `change`.
    #[must_use]
    pub fn message_for_change(&self, change: &CodeChange) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.contains_change(change))
    }
}
