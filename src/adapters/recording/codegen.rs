//! Recording adapter for the `CodeGenClient` port.

use serde_json::json;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{BackendFuture, CodeGenClient, GenerateRequest, GenerateResponse, ModelInfo};

/// Records code generation calls while delegating to an inner client.
pub struct RecordingCodeGen {
    inner: Box<dyn CodeGenClient>,
    recorder: SharedRecorder,
}

impl RecordingCodeGen {
    /// Wraps `inner`, logging into `recorder`.
    pub fn new(inner: Box<dyn CodeGenClient>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl CodeGenClient for RecordingCodeGen {
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>> {
        Box::pin(async move {
            let result = self.inner.list_models().await;
            record_result(&self.recorder, "codegen", "list_models", &json!({}), &result);
            result
        })
    }

    fn generate(&self, request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse> {
        let request = request.clone();
        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            record_result(&self.recorder, "codegen", "generate", &request, &result);
            result
        })
    }
}
