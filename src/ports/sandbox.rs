//! Sandbox API port for publishing an ingested project.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingest::model::{DirectoryRecord, ModuleRecord};

/// Boxed future returned by [`SandboxApi::create_sandbox`].
pub type CreateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CreatedSandbox, SandboxApiError>> + Send + 'a>>;

/// The body of a sandbox creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxDraft {
    /// Directory records, parents before children.
    pub directories: Vec<DirectoryRecord>,
    /// Absolute URLs of scripts and stylesheets loaded from other hosts.
    pub external_resources: Vec<String>,
    /// Module (file) records.
    pub modules: Vec<ModuleRecord>,
    /// Package name to exact version.
    pub npm_dependencies: BTreeMap<String, String>,
}

/// A sandbox created by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedSandbox {
    /// Identifier of the new sandbox, used to build its URL.
    pub id: String,
}

/// Failure reported while creating a sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SandboxApiError {
    /// Human-readable summary.
    pub message: String,
    /// Validation messages returned by the service, if any.
    #[serde(default)]
    pub validation: Vec<String>,
}

impl SandboxApiError {
    /// Creates an error without validation details.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), validation: Vec::new() }
    }
}

/// Creates sandboxes on the remote service.
pub trait SandboxApi: Send + Sync {
    /// Uploads `draft`, authenticating with `token` as a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the service rejects the
    /// sandbox; remote validation messages are carried in the error.
    fn create_sandbox(&self, draft: &SandboxDraft, token: &str) -> CreateFuture<'_>;
}
