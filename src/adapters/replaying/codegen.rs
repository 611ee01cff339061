//! Replaying adapter for the `CodeGenClient` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::CassetteReplayer;
use crate::ports::{BackendFuture, CodeGenClient, GenerateRequest, GenerateResponse, ModelInfo};

/// Serves recorded model lists and generations.
pub struct ReplayingCodeGen {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCodeGen {
    /// Creates a client backed by `replayer`.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl CodeGenClient for ReplayingCodeGen {
    fn list_models(&self) -> BackendFuture<'_, Vec<ModelInfo>> {
        let output = next_output(&self.replayer, "codegen", "list_models");
        let result = replay_result(output, "codegen::list_models");
        Box::pin(async move { result })
    }

    fn generate(&self, _request: &GenerateRequest) -> BackendFuture<'_, GenerateResponse> {
        let output = next_output(&self.replayer, "codegen", "generate");
        let result = replay_result(output, "codegen::generate");
        Box::pin(async move { result })
    }
}
