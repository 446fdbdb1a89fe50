//! Replaying adapter for the `SandboxApi` port.

use std::sync::Mutex;

use serde_json::Value;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CreateFuture, CreatedSandbox, SandboxApi, SandboxApiError, SandboxDraft};

/// Serves recorded sandbox creations from a cassette.
pub struct ReplayingSandboxApi {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingSandboxApi {
    /// Creates a new replaying client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

fn decode(output: Value) -> Result<CreatedSandbox, SandboxApiError> {
    let malformed = |e: serde_json::Error| {
        SandboxApiError::new(format!("sandbox::create_sandbox: failed to deserialize: {e}"))
    };
    if let Some(err) = output.get("err") {
        // Older cassettes may hold a bare message.
        return Err(match err {
            Value::String(message) => SandboxApiError::new(message.clone()),
            other => serde_json::from_value(other.clone()).map_err(malformed)?,
        });
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(malformed)
}

impl SandboxApi for ReplayingSandboxApi {
    fn create_sandbox(&self, _draft: &SandboxDraft, _token: &str) -> CreateFuture<'_> {
        let output = next_output(&self.replayer, "sandbox", "create_sandbox");
        Box::pin(async move { decode(output) })
    }
}
