//! Recording adapter for the `VersionResolver` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{ResolveFuture, VersionResolver};

/// Records version resolutions while delegating to an inner resolver.
pub struct RecordingVersionResolver {
    inner: Box<dyn VersionResolver>,
    recorder: SharedRecorder,
}

impl RecordingVersionResolver {
    /// Creates a new recording resolver wrapping the given implementation.
    pub fn new(inner: Box<dyn VersionResolver>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ResolveInput {
    name: String,
    range: String,
}

impl VersionResolver for RecordingVersionResolver {
    fn resolve(&self, name: &str, range: &str) -> ResolveFuture<'_> {
        let input = ResolveInput { name: name.to_string(), range: range.to_string() };

        Box::pin(async move {
            let result = self.inner.resolve(&input.name, &input.range).await;
            record_result(&self.recorder, "registry", "resolve", &input, &result);
            result
        })
    }
}
