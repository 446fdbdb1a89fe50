//! Replaying adapter for the `VersionResolver` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ResolveFuture, VersionResolver};

/// Serves recorded version resolutions from a cassette.
pub struct ReplayingVersionResolver {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingVersionResolver {
    /// Creates a new replaying resolver from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl VersionResolver for ReplayingVersionResolver {
    fn resolve(&self, _name: &str, _range: &str) -> ResolveFuture<'_> {
        let output = next_output(&self.replayer, "registry", "resolve");
        Box::pin(async move { replay_result::<String>(output, "registry::resolve") })
    }
}
