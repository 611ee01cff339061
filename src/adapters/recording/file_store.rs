//! Recording adapter for the `FileStore` port.

use serde_json::json;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{BackendFuture, FileNode, FileStore};

/// Records file store calls while delegating to an inner store.
pub struct RecordingFileStore {
    inner: Box<dyn FileStore>,
    recorder: SharedRecorder,
}

impl RecordingFileStore {
    /// Wraps `inner`, logging into `recorder`.
    pub fn new(inner: Box<dyn FileStore>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl FileStore for RecordingFileStore {
    fn list_tree(&self) -> BackendFuture<'_, Vec<FileNode>> {
        Box::pin(async move {
            let result = self.inner.list_tree().await;
            record_result(&self.recorder, "files", "list_tree", &json!({}), &result);
            result
        })
    }

    fn read(&self, path: &str) -> BackendFuture<'_, String> {
        let path = path.to_string();
        Box::pin(async move {
            let result = self.inner.read(&path).await;
            record_result(&self.recorder, "files", "read", &json!({ "path": path }), &result);
            result
        })
    }

    fn create(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let input = json!({ "path": path, "content": content });
        let path = path.to_string();
        let content = content.to_string();
        Box::pin(async move {
            let result = self.inner.create(&path, &content).await;
            record_result(&self.recorder, "files", "create", &input, &result);
            result
        })
    }

    fn update(&self, path: &str, content: &str) -> BackendFuture<'_, ()> {
        let input = json!({ "path": path, "content": content });
        let path = path.to_string();
        let content = content.to_string();
        Box::pin(async move {
            let result = self.inner.update(&path, &content).await;
            record_result(&self.recorder, "files", "update", &input, &result);
            result
        })
    }

    fn delete(&self, path: &str) -> BackendFuture<'_, ()> {
        let path = path.to_string();
        Box::pin(async move {
            let result = self.inner.delete(&path).await;
            record_result(&self.recorder, "files", "delete", &json!({ "path": path }), &result);
            result
        })
    }
}
