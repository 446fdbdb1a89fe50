//! Filesystem port for file I/O operations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// Entry names of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirListing {
    /// Sorted entry names that are valid UTF-8.
    pub names: Vec<String>,
    /// Entries whose names are not valid UTF-8, lossily decoded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<String>,
}

/// Provides filesystem access for the project walk and the credential file.
///
/// Ingestion only ever reads through this port; writes are reserved for the
/// credential store.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Reads the raw bytes of a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError>;

    /// Writes the given contents to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Removes a file. Removing a file that does not exist succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn remove_file(&self, path: &Path) -> Result<(), PortError>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory, following links.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if the path itself is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// Lists the entries of a directory.
    ///
    /// An entry whose name cannot be represented as UTF-8 ends up in
    /// [`DirListing::rejected`] rather than failing the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(&self, path: &Path) -> Result<DirListing, PortError>;
}
