//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::config::cassette_file_name;
use super::recorder::CassetteRecorder;

/// Shared handle to one port's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// One recorder per port, all writing into a timestamped directory.
#[allow(missing_docs)]
pub struct RecordingSession {
    pub clock: SharedRecorder,
    pub fs: SharedRecorder,
    pub shell: SharedRecorder,
    pub id_gen: SharedRecorder,
    pub registry: SharedRecorder,
    pub sandbox: SharedRecorder,
    pub prompt: SharedRecorder,
    pub handshake: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Starts a session writing to `<base>/<timestamp>/`.
    ///
    /// # Errors
    ///
    /// Returns an error if that directory already exists or cannot be created.
    pub fn new(base: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(cassette_file_name(port));
            Arc::new(Mutex::new(CassetteRecorder::new(path, format!("{timestamp}-{port}"))))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            fs: make_recorder("fs"),
            shell: make_recorder("shell"),
            id_gen: make_recorder("id_gen"),
            registry: make_recorder("registry"),
            sandbox: make_recorder("sandbox"),
            prompt: make_recorder("prompt"),
            handshake: make_recorder("handshake"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every port's cassette that recorded anything and returns the directory.
    ///
    /// The recording context must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a cassette cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(recorder: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(recorder)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                return Ok(());
            }
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.shell, "shell")?;
        finish_one(self.id_gen, "id_gen")?;
        finish_one(self.registry, "registry")?;
        finish_one(self.sandbox, "sandbox")?;
        finish_one(self.prompt, "prompt")?;
        finish_one(self.handshake, "handshake")?;

        Ok(self.output_dir)
    }
}
