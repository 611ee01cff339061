//! Code-generation port for the AI backend.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::BackendFuture;

/// A model the backend can generate with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Identifier sent back as `model_id`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Provider the model belongs to (e.g. `"openai"`).
    pub provider: String,
}

/// A code-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// What to generate.
    pub prompt: String,
    /// Model to generate with.
    pub model_id: String,
    /// Target language identifier.
    pub language: String,
    /// File the prompt is about, if one is open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// The generated text, possibly markdown with fenced code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Raw generated text.
    pub code: String,
}

/// Talks to the code-generation endpoint.
pub trait CodeGenClient: Send + Sync {
    /// Lists the models available across all providers.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or rejects the request.
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>>;

    /// Generates code for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no code.
    fn generate(&self, request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse>;
}

impl<T: CodeGenClient + ?Sized> CodeGenClient for Arc<T> {
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>> {
        (**self).list_models()
    }

    fn generate(&self, request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse> {
        (**self).generate(request)
    }
}
