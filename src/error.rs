//! Error taxonomy for calls to the backend service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single backend operation.
///
/// Every variant is recoverable: callers surface a notification and leave
/// their local state untouched. Serializable so cassettes can replay failures.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendError {
    /// The request never produced an HTTP response (connection refused, DNS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The backend answered with a non-success status code.
    #[error("backend rejected request ({status}): {detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Detail message extracted from the response body.
        detail: String,
    },
    /// The response body could not be decoded or was empty.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl BackendError {
    /// Returns `true` if the backend reported the target as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Rejected { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_includes_status_and_detail() {
        let err = BackendError::Rejected { status: 404, detail: "File not found".into() };
        assert_eq!(err.to_string(), "backend rejected request (404): File not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn round_trips_through_json() {
        let err = BackendError::Transport("connection refused".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({"transport": "connection refused"}));
        assert_eq!(serde_json::from_value::<BackendError>(json).unwrap(), err);
    }

    #[test]
    fn transport_is_not_not_found() {
        assert!(!BackendError::Transport("refused".into()).is_not_found());
    }
}
