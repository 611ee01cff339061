//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{BackendHttp, LiveCodeGenClient, LiveFileStore, SystemClock, UuidGenerator};
use crate::adapters::recording::{
    RecordingClock, RecordingCodeGen, RecordingFileStore, RecordingIdGenerator,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingCodeGen, ReplayingFileStore, ReplayingIdGenerator,
};
use crate::cassette::{Cassette, CassetteReplayer, RecordingSession};
use crate::config::Config;
use crate::ports::{Clock, CodeGenClient, FileStore, IdGenerator};

/// One trait object per external boundary.
///
/// Constructors wire different adapters (live, recording, replaying); tests
/// assemble their own with [`ServiceContext::from_parts`].
pub struct ServiceContext {
    /// Backend file store.
    pub files: Box<dyn FileStore>,
    /// Code generation endpoint.
    pub codegen: Box<dyn CodeGenClient>,
    /// Time source for message and change timestamps.
    pub clock: Box<dyn Clock>,
    /// Message id source.
    pub id_gen: Box<dyn IdGenerator>,
}

impl ServiceContext {
    /// Assembles a context from individual adapters.
    #[must_use]
    pub fn from_parts(
        files: Box<dyn FileStore>,
        codegen: Box<dyn CodeGenClient>,
        clock: Box<dyn Clock>,
        id_gen: Box<dyn IdGenerator>,
    ) -> Self {
        Self { files, codegen, clock, id_gen }
    }

    /// Creates a context talking to the backend at `config.backend_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, String> {
        let http = BackendHttp::new(&config.backend_url, config.timeout).map_err(|e| e.to_string())?;
        Ok(Self {
            files: Box::new(LiveFileStore::new(http.clone())),
            codegen: Box::new(LiveCodeGenClient::new(http)),
            clock: Box::new(SystemClock),
            id_gen: Box::new(UuidGenerator),
        })
    }

    /// Creates a live context whose calls are recorded under `root`.
    ///
    /// The session must be finished after the context is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory or HTTP client cannot be created.
    pub fn recording(config: &Config, root: &Path) -> Result<(Self, RecordingSession), String> {
        let live = Self::live(config)?;
        let session = RecordingSession::new(root, &config.backend_url)?;
        let ctx = Self {
            files: Box::new(RecordingFileStore::new(live.files, session.files.clone())),
            codegen: Box::new(RecordingCodeGen::new(live.codegen, session.codegen.clone())),
            clock: Box::new(RecordingClock::new(live.clock, session.clock.clone())),
            id_gen: Box::new(RecordingIdGenerator::new(live.id_gen, session.id_gen.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a context from per-port cassette files in a recording directory.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the four cassettes is missing or invalid.
    pub fn replaying_dir(dir: &Path) -> Result<Self, String> {
        let load = |port: &str| -> Result<CassetteReplayer, String> {
            let cassette = Cassette::load(&dir.join(format!("{port}.cassette.yaml")))?;
            Ok(CassetteReplayer::new(&cassette))
        };
        Ok(Self {
            files: Box::new(ReplayingFileStore::new(load("files")?)),
            codegen: Box::new(ReplayingCodeGen::new(load("codegen")?)),
            clock: Box::new(ReplayingClock::new(load("clock")?)),
            id_gen: Box::new(ReplayingIdGenerator::new(load("id_gen")?)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::Interaction;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn interaction(port: &str, method: &str, input: Value, output: Value) -> Interaction {
        Interaction { seq: 0, port: port.into(), method: method.into(), input, output }
    }

    #[tokio::test]
    async fn replaying_dir_serves_every_port() {
        let dir = std::env::temp_dir().join("coedit_context_replay_test");
        std::fs::create_dir_all(&dir).unwrap();
        let ports = [
            ("clock", interaction("clock", "now", json!(null), json!("2025-03-15T14:30:00Z"))),
            ("id_gen", interaction("id_gen", "generate_id", json!(null), json!("msg-001"))),
            (
                "codegen",
                interaction(
                    "codegen",
                    "list_models",
                    json!({}),
                    json!({"ok": [{"id": "gpt-4", "name": "GPT-4", "provider": "openai"}]}),
                ),
            ),
            ("files", interaction("files", "read", json!({"path": "a.py"}), json!({"ok": "print(1)"}))),
        ];
        for (port, recorded) in ports {
            let cassette = Cassette {
                name: port.into(),
                recorded_at: Utc::now(),
                backend: "http://localhost:8000".into(),
                interactions: vec![recorded],
            };
            let path = dir.join(format!("{port}.cassette.yaml"));
            std::fs::write(path, serde_yaml::to_string(&cassette).unwrap()).unwrap();
        }

        let ctx = ServiceContext::replaying_dir(&dir).unwrap();

        assert_eq!(ctx.clock.now().to_rfc3339(), "2025-03-15T14:30:00+00:00");
        assert_eq!(ctx.id_gen.generate_id(), "msg-001");
        assert_eq!(ctx.codegen.list_models().await.unwrap()[0].id, "gpt-4");
        assert_eq!(ctx.files.read("a.py").await.unwrap(), "print(1)");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_dir_with_missing_cassette_is_an_error() {
        let result = ServiceContext::replaying_dir(Path::new("/nonexistent/recording"));
        assert!(result.is_err());
    }

    #[test]
    fn live_context_builds_without_contacting_backend() {
        assert!(ServiceContext::live(&Config::default()).is_ok());
    }
}
