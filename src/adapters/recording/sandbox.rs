//! Recording adapter for the `SandboxApi` port.

use serde::Serialize;
use serde_json::json;

use super::record_interaction;
use crate::cassette::session::SharedRecorder;
use crate::ports::{CreateFuture, SandboxApi, SandboxDraft};

/// Records sandbox creations while delegating to an inner client.
///
/// The bearer token is never written to the cassette.
pub struct RecordingSandboxApi {
    inner: Box<dyn SandboxApi>,
    recorder: SharedRecorder,
}

impl RecordingSandboxApi {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn SandboxApi>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CreateInput<'a> {
    draft: &'a SandboxDraft,
}

impl SandboxApi for RecordingSandboxApi {
    fn create_sandbox(&self, draft: &SandboxDraft, token: &str) -> CreateFuture<'_> {
        let draft = draft.clone();
        let token = token.to_string();

        Box::pin(async move {
            let result = self.inner.create_sandbox(&draft, &token).await;
            // Errors keep their validation list, so they are stored whole.
            let output = match &result {
                Ok(created) => json!({ "ok": created }),
                Err(err) => json!({ "err": err }),
            };
            let input = CreateInput { draft: &draft };
            record_interaction(&self.recorder, "sandbox", "create_sandbox", &input, &output);
            result
        })
    }
}
