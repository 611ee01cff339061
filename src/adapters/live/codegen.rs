//! Live adapter for the `CodeGenClient` port.

use serde::Deserialize;

use super::http::BackendHttp;
use crate::error::BackendError;
use crate::ports::{BackendFuture, CodeGenClient, GenerateRequest, GenerateResponse, ModelInfo};

/// Code generation through the backend's `/models` and `/generate-code` endpoints.
pub struct LiveCodeGenClient {
    http: BackendHttp,
}

impl LiveCodeGenClient {
    /// Creates a client using the given backend connection.
    #[must_use]
    pub fn new(http: BackendHttp) -> Self {
        Self { http }
    }
}

#[derive(Deserialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

impl CodeGenClient for LiveCodeGenClient {
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>> {
        Box::pin(async move {
            let request = self.http.client().get(self.http.url("/models"));
            let response: ModelsResponse = self.http.send_json(request).await?;
            Ok(response.models)
        })
    }

    fn generate(&self, request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse> {
        let request = self.http.client().post(self.http.url("/generate-code")).json(request);
        Box::pin(async move {
            let response: GenerateResponse = self.http.send_json(request).await?;
            if response.code.trim().is_empty() {
                return Err(BackendError::Malformed("Backend returned no code".into()));
            }
            Ok(response)
        })
    }
}
