//! Fatal failures of the ingestion pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::SandboxApiError;

/// Fatal failures of the ingestion pipeline.
///
/// Per-file and per-dependency problems are not errors; they are collected
/// in [`super::TreeMapping`] and [`super::DependencyMapping`].
#[derive(Error, Debug)]
#[allow(missing_docs)]
pub enum IngestError {
    /// The project directory does not exist.
    #[error("The given path ({}) doesn't exist.", .0.display())]
    MissingProject(PathBuf),

    /// No `package.json` at the project root.
    #[error("The project doesn't have a package.json.")]
    MissingManifest,

    /// `package.json` exists but is not a valid manifest.
    #[error("The package.json could not be read: {0}")]
    InvalidManifest(String),

    /// `package.json` has no `dependencies` block.
    #[error("The package.json doesn't have any dependencies.")]
    MissingDependencies,

    /// The HTML entry point exists but cannot be read as text.
    #[error("Could not read {}: {message}", path.display())]
    EntryPoint { path: PathBuf, message: String },

    /// The source root cannot be listed as a directory.
    #[error("Could not open the source directory {}: {message}", path.display())]
    SourceTree { path: PathBuf, message: String },

    /// More modules than the service accepts.
    #[error(
        "This project is too big, it contains {count} files which is more than the max of {max}."
    )]
    TooManyModules { count: usize, max: usize },

    /// More directories than the service accepts.
    #[error(
        "This project is too big, it contains {count} directories \
         which is more than the max of {max}."
    )]
    TooManyDirectories { count: usize, max: usize },

    /// The operator could not be asked a question.
    #[error("Could not ask for confirmation: {0}")]
    Prompt(String),

    /// The sandbox service rejected the upload or could not be reached.
    #[error("Something went wrong while uploading to the API: {0}")]
    Upload(SandboxApiError),

    /// Writing operator output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl IngestError {
    /// Validation messages from the sandbox service, when the upload was rejected.
    #[must_use]
    pub fn validation_messages(&self) -> &[String] {
        match self {
            Self::Upload(err) => &err.validation,
            _ => &[],
        }
    }
}
