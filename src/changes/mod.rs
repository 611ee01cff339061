//! Proposed code changes produced by the assistant.

pub mod language;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use language::Language;

/// What a change does to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// The file is new.
    Create,
    /// The file's content is replaced.
    Update,
    /// The file is removed.
    Delete,
}

/// A proposed mutation to one file.
///
/// Changes are never modified after creation. `(file_path, timestamp)`
/// identifies a change within a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChange {
    /// Path of the target file in the file store.
    pub file_path: String,
    /// Full proposed content after the change.
    pub content: String,
    /// Syntax hint derived from the file extension.
    pub language: Language,
    /// Kind of mutation.
    pub kind: ChangeKind,
    /// When the change was produced.
    pub timestamp: DateTime<Utc>,
}

impl CodeChange {
    /// Creates a change, deriving the language from `file_path`.
    #[must_use]
    pub fn new(
        file_path: impl Into<String>,
        content: impl Into<String>,
        kind: ChangeKind,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let file_path = file_path.into();
        let language = Language::from_file_name(&file_path);
        Self { file_path, content: content.into(), language, kind, timestamp }
    }

    /// Returns `true` if `other` is the same change (same path and timestamp).
    #[must_use]
    pub fn same_change(&self, other: &CodeChange) -> bool {
        self.file_path == other.file_path && self.timestamp == other.timestamp
    }
}

/// Sorts changes newest first. Ties keep their original order.
pub fn sort_newest_first(changes: &mut [CodeChange]) {
    changes.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
