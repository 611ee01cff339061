//! Replaying adapters that serve recorded interactions from a cassette.

pub mod clock;
pub mod codegen;
pub mod file_store;
pub mod id_gen;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::CassetteReplayer;
use crate::error::BackendError;

pub use clock::ReplayingClock;
pub use codegen::ReplayingCodeGen;
pub use file_store::ReplayingFileStore;
pub use id_gen::ReplayingIdGenerator;

/// Takes the output of the next recorded `port::method` interaction.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output.clone()
}

/// Decodes a recorded `{"ok": value}` / `{"err": error}` output.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, BackendError> {
    if let Some(err) = output.get("err") {
        return Err(serde_json::from_value(err.clone()).unwrap_or_else(|_| {
            BackendError::Malformed(format!("{context}: recorded error: {err}"))
        }));
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| BackendError::Malformed(format!("{context}: failed to deserialize: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_ok_and_err_outputs() {
        let ok: Result<String, _> = replay_result(json!({"ok": "text"}), "files::read");
        assert_eq!(ok.unwrap(), "text");

        let unit: Result<(), _> = replay_result(json!({"ok": null}), "files::update");
        assert!(unit.is_ok());

        let err: Result<String, _> =
            replay_result(json!({"err": {"transport": "refused"}}), "files::read");
        assert_eq!(err.unwrap_err(), BackendError::Transport("refused".into()));
    }

    #[test]
    fn unknown_error_shape_is_malformed() {
        let err: Result<String, _> = replay_result(json!({"err": "boom"}), "files::read");
        assert!(matches!(err, Err(BackendError::Malformed(msg)) if msg.contains("boom")));
    }
}
