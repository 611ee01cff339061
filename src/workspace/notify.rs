//! User-visible notifications.

use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// An action completed.
    Success,
    /// An action failed; local state was left as it was.
    Error,
}

/// A transient, dismissable message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Short title such as `"Changes Applied"`.
    pub title: String,
    /// Longer description.
    pub description: String,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: Level::Success, title: title.into(), description: description.into() }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { level: Level::Error, title: title.into(), description: description.into() }
    }

    /// Returns `true` for error notifications.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            Level::Success => "ok",
            Level::Error => "error",
        };
        write!(f, "[{marker}] {}: {}", self.title, self.description)
    }
}
