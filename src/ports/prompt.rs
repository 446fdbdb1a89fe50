//! Prompt port for operator go/no-go decisions.

use super::PortError;

/// Asks the operator a yes/no question.
pub trait Prompt: Send + Sync {
    /// Asks `question` and returns the operator's answer.
    ///
    /// `default` is the answer used when the operator just presses enter.
    /// When input is closed there is nobody to answer, and the question is
    /// declined regardless of `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if the question cannot be asked or the answer read.
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PortError>;
}
