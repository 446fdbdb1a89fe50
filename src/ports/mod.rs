//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the ingestion core and an
//! external system (time, filesystem, shell, IDs, package registry, sandbox
//! API, operator prompts, browser login). Implementations live in
//! `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod handshake;
pub mod id_gen;
pub mod prompt;
pub mod registry;
pub mod sandbox;
pub mod shell;

pub use clock::Clock;
pub use filesystem::{DirListing, FileSystem};
pub use handshake::LoginHandshake;
pub use id_gen::IdGenerator;
pub use prompt::Prompt;
pub use registry::{ResolveFuture, VersionResolver};
pub use sandbox::{CreateFuture, CreatedSandbox, SandboxApi, SandboxApiError, SandboxDraft};
pub use shell::{ShellExecutor, ShellOutput};

/// Error type shared by the synchronous ports.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
