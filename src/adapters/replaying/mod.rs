//! Replaying adapters that replay recorded interactions.

pub mod clock;
pub mod filesystem;
pub mod handshake;
pub mod id_gen;
pub mod prompt;
pub mod registry;
pub mod sandbox;
pub mod shell;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use handshake::ReplayingLoginHandshake;
pub use id_gen::ReplayingIdGenerator;
pub use prompt::ReplayingPrompt;
pub use registry::ReplayingVersionResolver;
pub use sandbox::ReplayingSandboxApi;
pub use shell::ReplayingShellExecutor;

use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Takes the output of the next `port`/`method` interaction.
pub(crate) fn next_output(replayer: &Mutex<CassetteReplayer>, port: &str, method: &str) -> Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Reads a recorded `{"ok": v}` / `{"err": "message"}` output back into a `Result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("ok") => map.remove("ok").unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
