//! Recording session holding one recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Shared handle to a recorder, cloned into each recording adapter.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Per-port recorders writing into one timestamped directory.
pub struct RecordingSession {
    /// Recorder for file store interactions.
    pub files: SharedRecorder,
    /// Recorder for code generation interactions.
    pub codegen: SharedRecorder,
    /// Recorder for clock readings.
    pub clock: SharedRecorder,
    /// Recorder for generated ids.
    pub id_gen: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Creates `<root>/<timestamp>/` and a recorder per port inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path, backend: &str) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"), backend)))
        };

        Ok(Self {
            files: make_recorder("files"),
            codegen: make_recorder("codegen"),
            clock: make_recorder("clock"),
            id_gen: make_recorder("id_gen"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every cassette and returns the output directory.
    ///
    /// All adapters holding the recorders must have been dropped first. Every
    /// port is attempted even after one fails.
    ///
    /// # Errors
    ///
    /// Returns the first port's error if a recorder is still shared or a file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(recorder: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        let results = [
            finish_one(self.files, "files"),
            finish_one(self.codegen, "codegen"),
            finish_one(self.clock, "clock"),
            finish_one(self.id_gen, "id_gen"),
        ];
        results.into_iter().collect::<Result<Vec<()>, String>>()?;

        Ok(self.output_dir)
    }
}
