//! Recording adapters: delegate to an inner port and log every call.

pub mod clock;
pub mod codegen;
pub mod file_store;
pub mod id_gen;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;
use crate::error::BackendError;

pub use clock::RecordingClock;
pub use codegen::RecordingCodeGen;
pub use file_store::RecordingFileStore;
pub use id_gen::RecordingIdGenerator;

/// Records an infallible call.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input = serde_json::to_value(input).unwrap_or_default();
    let output = serde_json::to_value(output).unwrap_or_default();
    recorder.lock().expect("recorder lock poisoned").record(port, method, input, output);
}

/// Records a backend call as `{"ok": value}` or `{"err": error}`.
pub(crate) fn record_result<I, T>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, BackendError>,
) where
    I: Serialize,
    T: Serialize,
{
    let output = match result {
        Ok(value) => serde_json::json!({ "ok": value }),
        Err(error) => serde_json::json!({ "err": error }),
    };
    let input = serde_json::to_value(input).unwrap_or_default();
    recorder.lock().expect("recorder lock poisoned").record(port, method, input, output);
}
