//! Replaying adapter for the `LoginHandshake` port.

use std::sync::Mutex;

use serde::Deserialize;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{LoginHandshake, PortError};

/// Replays a recorded login: reports the recorded port, then the message.
pub struct ReplayingLoginHandshake {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLoginHandshake {
    /// Creates a new replaying handshake from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

#[derive(Deserialize)]
struct Received {
    port: Option<u16>,
    body: String,
}

impl LoginHandshake for ReplayingLoginHandshake {
    fn receive_credentials(
        &self,
        on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError> {
        let output = next_output(&self.replayer, "handshake", "receive_credentials");
        let received: Received = replay_result(output, "handshake::receive_credentials")?;
        if let Some(port) = received.port {
            on_listening(port)?;
        }
        Ok(received.body)
    }
}
