//! Records that make up an ingestion payload.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A folder of the project, linked to its enclosing folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Short identifier, unique within the payload.
    #[serde(rename = "shortid")]
    pub id: String,
    /// Directory base name.
    pub title: String,
    /// Identifier of the enclosing directory; `None` at the source root.
    #[serde(rename = "directory_shortid")]
    pub parent_id: Option<String>,
}

/// A single source file of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Short identifier, unique within the payload.
    #[serde(rename = "shortid")]
    pub id: String,
    /// File base name.
    pub title: String,
    /// File contents.
    pub content: String,
    /// Identifier of the enclosing directory; `None` at the source root.
    #[serde(rename = "directory_shortid")]
    pub directory_id: Option<String>,
}

/// A file that could not be included in the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    /// Path of the offending file.
    pub path: PathBuf,
    /// Why it was left out.
    pub message: String,
}

impl FileError {
    /// Creates a file error.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

/// A dependency whose version range could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    /// Package name.
    pub name: String,
    /// The range as declared in the manifest.
    pub range: String,
    /// Reason reported by the resolver.
    pub message: String,
}
