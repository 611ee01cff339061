//! Scripted code generator for tests and offline use.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::error::BackendError;
use crate::ports::{BackendFuture, CodeGenClient, GenerateRequest, GenerateResponse, ModelInfo};

/// Serves queued responses in order and remembers every request.
#[derive(Debug, Default)]
pub struct ScriptedCodeGen {
    models: Vec<ModelInfo>,
    models_error: Mutex<Option<BackendError>>,
    responses: Mutex<VecDeque<Result<String, BackendError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedCodeGen {
    /// Creates a generator advertising `models`.
    #[must_use]
    pub fn new(models: Vec<ModelInfo>) -> Self {
        Self { models, ..Self::default() }
    }

    /// Queues a successful response with the given raw text.
    pub fn push_response(&self, code: impl Into<String>) {
        self.responses.lock().expect("script lock poisoned").push_back(Ok(code.into()));
    }

    /// Queues a failed response.
    pub fn push_error(&self, error: BackendError) {
        self.responses.lock().expect("script lock poisoned").push_back(Err(error));
    }

    /// Makes every `list_models` call fail with `error`.
    pub fn fail_models(&self, error: BackendError) {
        *self.models_error.lock().expect("script lock poisoned") = Some(error);
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("script lock poisoned").clone()
    }
}

impl CodeGenClient for ScriptedCodeGen {
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>> {
        let result = match self.models_error.lock().expect("script lock poisoned").clone() {
            Some(e) => Err(e),
            None => Ok(self.models.clone()),
        };
        Box::pin(async move { result })
    }

    fn generate(&self, request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse> {
        self.requests.lock().expect("script lock poisoned").push(request.clone());
        let next = self.responses.lock().expect("script lock poisoned").pop_front();
        let result = match next {
            Some(Ok(code)) => Ok(GenerateResponse { code }),
            Some(Err(e)) => Err(e),
            None => Err(BackendError::Malformed("no scripted response left".into())),
        };
        Box::pin(async move { result })
    }
}
