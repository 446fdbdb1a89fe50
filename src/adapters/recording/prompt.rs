//! Recording adapter for the `Prompt` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{PortError, Prompt};

/// Records operator answers while delegating to an inner prompt.
pub struct RecordingPrompt {
    inner: Box<dyn Prompt>,
    recorder: SharedRecorder,
}

impl RecordingPrompt {
    /// Creates a new recording prompt wrapping the given implementation.
    pub fn new(inner: Box<dyn Prompt>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct QuestionInput<'a> {
    question: &'a str,
    default: bool,
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, question: &str, default: bool) -> Result<bool, PortError> {
        let result = self.inner.confirm(question, default);
        let input = QuestionInput { question, default };
        record_result(&self.recorder, "prompt", "confirm", &input, &result);
        result
    }
}
