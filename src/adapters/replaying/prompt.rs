//! Replaying adapter for the `Prompt` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, Prompt};

/// Replays recorded operator answers from a cassette.
pub struct ReplayingPrompt {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingPrompt {
    /// Creates a new replaying prompt from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Prompt for ReplayingPrompt {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool, PortError> {
        replay_result(next_output(&self.replayer, "prompt", "confirm"), "prompt::confirm")
    }
}
