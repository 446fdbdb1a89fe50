//! Recording adapter for the `LoginHandshake` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{LoginHandshake, PortError};

/// Records the listening port and the message received.
pub struct RecordingLoginHandshake {
    inner: Box<dyn LoginHandshake>,
    recorder: SharedRecorder,
}

impl RecordingLoginHandshake {
    /// Creates a new recording handshake wrapping the given implementation.
    pub fn new(inner: Box<dyn LoginHandshake>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct Received {
    port: Option<u16>,
    body: String,
}

impl LoginHandshake for RecordingLoginHandshake {
    fn receive_credentials(
        &self,
        on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError> {
        let mut port = None;
        let result = self.inner.receive_credentials(&mut |p| {
            port = Some(p);
            on_listening(p)
        });

        let recorded = result.as_ref().map(|body| Received { port, body: body.clone() });
        record_result(&self.recorder, "handshake", "receive_credentials", &(), &recorded);
        result
    }
}
