//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, ShellExecutor, ShellOutput};

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _command: &str) -> Result<ShellOutput, PortError> {
        replay_result(next_output(&self.replayer, "shell", "run"), "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::test_support::replayer;
    use serde_json::json;

    #[test]
    fn replays_output_and_errors() {
        let shell = ReplayingShellExecutor::new(replayer(
            "shell",
            &[
                ("run", json!({"ok": {"exit_code": 0, "stdout": "", "stderr": ""}})),
                ("run", json!({"err": "command not found"})),
            ],
        ));
        assert_eq!(shell.run("xdg-open x").unwrap().exit_code, 0);
        assert_eq!(shell.run("xdg-open x").unwrap_err().to_string(), "command not found");
    }
}
