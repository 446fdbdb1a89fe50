//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths.
///
/// Ports without a path are not replayed; what happens to them depends on
/// the context the replayers are layered over.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Cassette for the clock port.
    pub clock: Option<PathBuf>,
    /// Cassette for the filesystem port.
    pub fs: Option<PathBuf>,
    /// Cassette for the shell port.
    pub shell: Option<PathBuf>,
    /// Cassette for the ID generator port.
    pub id_gen: Option<PathBuf>,
    /// Cassette for the version resolver port.
    pub registry: Option<PathBuf>,
    /// Cassette for the sandbox API port.
    pub sandbox: Option<PathBuf>,
    /// Cassette for the prompt port.
    pub prompt: Option<PathBuf>,
    /// Cassette for the login handshake port.
    pub handshake: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
#[allow(missing_docs)]
pub struct PortReplayers {
    pub clock: Option<CassetteReplayer>,
    pub fs: Option<CassetteReplayer>,
    pub shell: Option<CassetteReplayer>,
    pub id_gen: Option<CassetteReplayer>,
    pub registry: Option<CassetteReplayer>,
    pub sandbox: Option<CassetteReplayer>,
    pub prompt: Option<CassetteReplayer>,
    pub handshake: Option<CassetteReplayer>,
}

/// File name of the cassette recorded for `port` by a recording session.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

impl CassetteConfig {
    /// Returns a config where no port has a cassette.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Picks up the per-port cassettes present in a recorded session directory.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let pick = |port: &str| {
            let path = dir.join(cassette_file_name(port));
            path.is_file().then_some(path)
        };
        Self {
            clock: pick("clock"),
            fs: pick("fs"),
            shell: pick("shell"),
            id_gen: pick("id_gen"),
            registry: pick("registry"),
            sandbox: pick("sandbox"),
            prompt: pick("prompt"),
            handshake: pick("handshake"),
        }
    }

    /// Loads a cassette file and creates a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Loads every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        let load = |path: &Option<PathBuf>| path.as_deref().map(Self::load_cassette).transpose();
        Ok(PortReplayers {
            clock: load(&self.clock)?,
            fs: load(&self.fs)?,
            shell: load(&self.shell)?,
            id_gen: load(&self.id_gen)?,
            registry: load(&self.registry)?,
            sandbox: load(&self.sandbox)?,
            prompt: load(&self.prompt)?,
            handshake: load(&self.handshake)?,
        })
    }
}
