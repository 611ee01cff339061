//! Replaying adapter for the `FileStore` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::CassetteReplayer;
use crate::ports::{BackendFuture, FileNode, FileStore};

/// Serves recorded file store results; arguments are not checked.
pub struct ReplayingFileStore {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileStore {
    /// Creates a store backed by `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn replay<T: serde::de::DeserializeOwned + Send + 'static>(
        &self,
        method: &str,
    ) -> BackendFuture<'_, T> {
        let output = next_output(&self.replayer, "files", method);
        let result = replay_result(output, &format!("files::{method}"));
        Box::pin(async move { result })
    }
}

impl FileStore for ReplayingFileStore {
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>> {
        self.replay("list_tree")
    }

    fn read(&self, _path: &str) -> BackendFuture<'_, String> {
        self.replay("read")
    }

    fn create(&self, _path: &str, _content: &str) -> BackendFuture<'_, ()> {
        self.replay("create")
    }

    fn update(&self, _path: &str, _content: &str) -> BackendFuture<'_, ()> {
        self.replay("update")
    }

    fn delete(&self, _path: &str) -> BackendFuture<'_, ()> {
        self.replay("delete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::{Cassette, Interaction};
    use crate::error::BackendError;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn replays_reads_and_failed_updates() {
        let cassette = Cassette {
            name: "files".into(),
            recorded_at: Utc::now(),
            backend: "b".into(),
            interactions: vec![
                Interaction {
                    seq: 0,
                    port: "files".into(),
                    method: "read".into(),
                    input: json!({"path": "a.py"}),
                    output: json!({"ok": "print(1)"}),
                },
                Interaction {
                    seq: 1,
                    port: "files".into(),
                    method: "update".into(),
                    input: json!({"path": "a.py", "content": "x"}),
                    output: json!({"err": {"rejected": {"status": 500, "detail": "disk full"}}}),
                },
            ],
        };
        let store = ReplayingFileStore::new(CassetteReplayer::new(&cassette));

        assert_eq!(store.read("a.py").await.unwrap(), "print(1)");
        assert_eq!(
            store.update("a.py", "x").await.unwrap_err(),
            BackendError::Rejected { status: 500, detail: "disk full".into() }
        );
    }
}
