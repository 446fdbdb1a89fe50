//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::{
    LiveClock, LiveFileSystem, LiveIdGenerator, LiveLoginHandshake, LivePrompt, LiveSandboxApi,
    LiveShellExecutor, LiveVersionResolver,
};
use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingIdGenerator, RecordingLoginHandshake,
    RecordingPrompt, RecordingSandboxApi, RecordingShellExecutor, RecordingVersionResolver,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingIdGenerator, ReplayingLoginHandshake,
    ReplayingPrompt, ReplayingSandboxApi, ReplayingShellExecutor, ReplayingVersionResolver,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::{
    Clock, CreateFuture, DirListing, FileSystem, IdGenerator, LoginHandshake, PortError, Prompt,
    ResolveFuture, SandboxApi, SandboxDraft, ShellExecutor, ShellOutput, VersionResolver,
};
use crate::settings::Settings;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for the project walk and the credential file.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor, used to open the browser.
    pub shell: Box<dyn ShellExecutor>,
    /// ID generator for record identifiers.
    pub id_gen: Box<dyn IdGenerator>,
    /// Resolver turning version ranges into exact versions.
    pub registry: Box<dyn VersionResolver>,
    /// Client of the sandbox service.
    pub sandbox: Box<dyn SandboxApi>,
    /// Operator confirmations.
    pub prompt: Box<dyn Prompt>,
    /// Browser sign-in handshake.
    pub handshake: Box<dyn LoginHandshake>,
}

impl ServiceContext {
    /// Creates a live context talking to the services named in `settings`.
    #[must_use]
    pub fn live(settings: &Settings) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            id_gen: Box::new(LiveIdGenerator::new()),
            registry: Box::new(LiveVersionResolver::new(settings.registry_url.clone())),
            sandbox: Box::new(LiveSandboxApi::new(settings.base_url.clone())),
            prompt: Box::new(LivePrompt),
            handshake: Box::new(LiveLoginHandshake),
        }
    }

    /// Wraps every port of `base` in a recording adapter.
    ///
    /// The context must be dropped before `session` is finished.
    #[must_use]
    pub fn recording(base: Self, session: &RecordingSession) -> Self {
        Self {
            clock: Box::new(RecordingClock::new(base.clock, Arc::clone(&session.clock))),
            fs: Box::new(RecordingFileSystem::new(base.fs, Arc::clone(&session.fs))),
            shell: Box::new(RecordingShellExecutor::new(base.shell, Arc::clone(&session.shell))),
            id_gen: Box::new(RecordingIdGenerator::new(base.id_gen, Arc::clone(&session.id_gen))),
            registry: Box::new(RecordingVersionResolver::new(
                base.registry,
                Arc::clone(&session.registry),
            )),
            sandbox: Box::new(RecordingSandboxApi::new(base.sandbox, Arc::clone(&session.sandbox))),
            prompt: Box::new(RecordingPrompt::new(base.prompt, Arc::clone(&session.prompt))),
            handshake: Box::new(RecordingLoginHandshake::new(
                base.handshake,
                Arc::clone(&session.handshake),
            )),
        }
    }

    /// Starts a recording session under `dir` around a live context.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        settings: &Settings,
        dir: &Path,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(dir)?;
        let ctx = Self::recording(Self::live(settings), &session);
        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// Every port replays its own interaction stream from the same cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        let replayer = || CassetteReplayer::new(&cassette);

        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer())),
            fs: Box::new(ReplayingFileSystem::new(replayer())),
            shell: Box::new(ReplayingShellExecutor::new(replayer())),
            id_gen: Box::new(ReplayingIdGenerator::new(replayer())),
            registry: Box::new(ReplayingVersionResolver::new(replayer())),
            sandbox: Box::new(ReplayingSandboxApi::new(replayer())),
            prompt: Box::new(ReplayingPrompt::new(replayer())),
            handshake: Box::new(ReplayingLoginHandshake::new(replayer())),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that
    /// fails with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        Self::replaying_over(config, Self::unconfigured())
    }

    /// Replays the ports `config` has cassettes for and keeps `base` for the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_over(config: &CassetteConfig, base: Self) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => base.clock,
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => base.fs,
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => base.shell,
            },
            id_gen: match replayers.id_gen {
                Some(r) => Box::new(ReplayingIdGenerator::new(r)),
                None => base.id_gen,
            },
            registry: match replayers.registry {
                Some(r) => Box::new(ReplayingVersionResolver::new(r)),
                None => base.registry,
            },
            sandbox: match replayers.sandbox {
                Some(r) => Box::new(ReplayingSandboxApi::new(r)),
                None => base.sandbox,
            },
            prompt: match replayers.prompt {
                Some(r) => Box::new(ReplayingPrompt::new(r)),
                None => base.prompt,
            },
            handshake: match replayers.handshake {
                Some(r) => Box::new(ReplayingLoginHandshake::new(r)),
                None => base.handshake,
            },
        })
    }

    fn unconfigured() -> Self {
        Self {
            clock: Box::new(PanickingClock),
            fs: Box::new(PanickingFileSystem),
            shell: Box::new(PanickingShellExecutor),
            id_gen: Box::new(PanickingIdGenerator),
            registry: Box::new(PanickingVersionResolver),
            sandbox: Box::new(PanickingSandboxApi),
            prompt: Box::new(PanickingPrompt),
            handshake: Box::new(PanickingLoginHandshake),
        }
    }
}

// --- Panicking adapters for unspecified ports ---

fn not_configured(port: &str, name: &str) -> ! {
    panic!("{name} port not configured in CassetteConfig: no cassette loaded for {port}");
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        not_configured("clock", "Clock")
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(&self, _path: &Path) -> Result<String, PortError> {
        not_configured("fs", "FileSystem")
    }
    fn read(&self, _path: &Path) -> Result<Vec<u8>, PortError> {
        not_configured("fs", "FileSystem")
    }
    fn write(&self, _path: &Path, _contents: &str) -> Result<(), PortError> {
        not_configured("fs", "FileSystem")
    }
    fn remove_file(&self, _path: &Path) -> Result<(), PortError> {
        not_configured("fs", "FileSystem")
    }
    fn exists(&self, _path: &Path) -> bool {
        not_configured("fs", "FileSystem")
    }
    fn is_dir(&self, _path: &Path) -> bool {
        not_configured("fs", "FileSystem")
    }
    fn is_symlink(&self, _path: &Path) -> bool {
        not_configured("fs", "FileSystem")
    }
    fn list_dir(&self, _path: &Path) -> Result<DirListing, PortError> {
        not_configured("fs", "FileSystem")
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(&self, _command: &str) -> Result<ShellOutput, PortError> {
        not_configured("shell", "ShellExecutor")
    }
}

struct PanickingIdGenerator;
impl IdGenerator for PanickingIdGenerator {
    fn generate_id(&self) -> String {
        not_configured("id_gen", "IdGenerator")
    }
}

struct PanickingVersionResolver;
impl VersionResolver for PanickingVersionResolver {
    fn resolve(&self, _name: &str, _range: &str) -> ResolveFuture<'_> {
        not_configured("registry", "VersionResolver")
    }
}

struct PanickingSandboxApi;
impl SandboxApi for PanickingSandboxApi {
    fn create_sandbox(&self, _draft: &SandboxDraft, _token: &str) -> CreateFuture<'_> {
        not_configured("sandbox", "SandboxApi")
    }
}

struct PanickingPrompt;
impl Prompt for PanickingPrompt {
    fn confirm(&self, _question: &str, _default: bool) -> Result<bool, PortError> {
        not_configured("prompt", "Prompt")
    }
}

struct PanickingLoginHandshake;
impl LoginHandshake for PanickingLoginHandshake {
    fn receive_credentials(
        &self,
        _on_listening: &mut dyn FnMut(u16) -> Result<(), String>,
    ) -> Result<String, PortError> {
        not_configured("handshake", "LoginHandshake")
    }
}
