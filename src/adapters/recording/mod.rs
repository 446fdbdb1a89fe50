//! Recording adapters that capture interactions to cassettes.
//!
//! Each adapter delegates to an inner implementation and appends what it
//! saw to its port's recorder. Results use the `{"ok": v}` / `{"err": msg}`
//! convention that the replaying adapters read back.

pub mod clock;
pub mod filesystem;
pub mod handshake;
pub mod id_gen;
pub mod prompt;
pub mod registry;
pub mod sandbox;
pub mod shell;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use handshake::RecordingLoginHandshake;
pub use id_gen::RecordingIdGenerator;
pub use prompt::RecordingPrompt;
pub use registry::RecordingVersionResolver;
pub use sandbox::RecordingSandboxApi;
pub use shell::RecordingShellExecutor;

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::session::SharedRecorder;

/// Record an interaction with a simple (non-Result) return value.
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
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction, storing the error as its message.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => json!({ "ok": serde_json::to_value(v).expect("failed to serialize ok value") }),
        Err(e) => json!({ "err": e.to_string() }),
    };
    record_interaction::<I, Value>(recorder, port, method, input, &output);
}
