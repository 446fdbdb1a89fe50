//! Recording adapter for the `FileSystem` port.

use std::path::Path;

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::session::SharedRecorder;
use crate::ports::{DirListing, FileSystem, PortError};

/// Records filesystem interactions while delegating to an inner implementation.
///
/// File contents are stored as text; `read` records raw bytes as a list of
/// numbers so binary files survive the round trip.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct WriteInput<'a> {
    path: String,
    contents: &'a str,
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let result = self.inner.read_to_string(path);
        record_result(&self.recorder, "fs", "read_to_string", &PathInput::new(path), &result);
        result
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, PortError> {
        let result = self.inner.read(path);
        record_result(&self.recorder, "fs", "read", &PathInput::new(path), &result);
        result
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let result = self.inner.write(path, contents);
        let input = WriteInput { path: path.display().to_string(), contents };
        record_result(&self.recorder, "fs", "write", &input, &result);
        result
    }

    fn remove_file(&self, path: &Path) -> Result<(), PortError> {
        let result = self.inner.remove_file(path);
        record_result(&self.recorder, "fs", "remove_file", &PathInput::new(path), &result);
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, "fs", "exists", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput::new(path), &result);
        result
    }

    fn is_symlink(&self, path: &Path) -> bool {
        let result = self.inner.is_symlink(path);
        record_interaction(&self.recorder, "fs", "is_symlink", &PathInput::new(path), &result);
        result
    }

    fn list_dir(&self, path: &Path) -> Result<DirListing, PortError> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, "fs", "list_dir", &PathInput::new(path), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::adapters::recording::test_support::{finish, scratch_recorder};
    use serde_json::json;

    #[test]
    fn records_results_and_plain_answers() {
        let (recorder, cassette_path) = scratch_recorder("sandship_rec_fs");
        let missing = cassette_path.with_file_name("missing.txt");
        {
            let fs = RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder));
            assert!(!fs.exists(&missing));
            assert!(fs.read_to_string(&missing).is_err());
        }

        let cassette = finish(recorder);
        assert_eq!(cassette.interactions[0].method, "exists");
        assert_eq!(cassette.interactions[0].output, json!(false));
        assert_eq!(cassette.interactions[1].method, "read_to_string");
        assert!(cassette.interactions[1].output.get("err").is_some());
        assert_eq!(
            cassette.interactions[1].input,
            json!({"path": missing.display().to_string()})
        );
    }
}
