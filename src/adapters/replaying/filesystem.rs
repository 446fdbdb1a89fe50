//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{DirListing, FileSystem, PortError};

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn answer(&self, method: &str) -> bool {
        next_output(&self.replayer, "fs", method)
            .as_bool()
            .unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        replay_result(next_output(&self.replayer, "fs", "read_to_string"), "fs::read_to_string")
    }

    fn read(&self, _path: &Path) -> Result<Vec<u8>, PortError> {
        replay_result(next_output(&self.replayer, "fs", "read"), "fs::read")
    }

    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        replay_result(next_output(&self.replayer, "fs", "write"), "fs::write")
    }

    fn remove_file(&self, _path: &Path) -> Result<(), PortError> {
        replay_result(next_output(&self.replayer, "fs", "remove_file"), "fs::remove_file")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.answer("exists")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.answer("is_dir")
    }

    fn is_symlink(&self, _path: &Path) -> bool {
        self.answer("is_symlink")
    }

    fn list_dir(&self, _path: &Path) -> Result<DirListing, PortError> {
        replay_result(next_output(&self.replayer, "fs", "list_dir"), "fs::list_dir")
    }
}
