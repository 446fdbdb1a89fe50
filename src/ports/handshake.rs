//! Login handshake port for receiving credentials from the browser.

use super::PortError;

/// Waits for a one-shot credential message from the sign-in page.
pub trait LoginHandshake: Send + Sync {
    /// Starts listening on a local port, calls `on_listening` with that port
    /// so the caller can point the browser at it, then blocks until a single
    /// message arrives and returns it verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be opened, `on_listening` fails,
    /// or the message cannot be read.
    fn receive_credentials(
        &self,
        on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError>;
}
