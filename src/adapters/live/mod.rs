//! Live adapters for real external interactions.

pub mod clock;
pub mod filesystem;
pub mod handshake;
pub mod id_gen;
pub mod prompt;
pub mod registry;
pub mod sandbox;
pub mod shell;

pub use clock::LiveClock;
pub use filesystem::LiveFileSystem;
pub use handshake::LiveLoginHandshake;
pub use id_gen::LiveIdGenerator;
pub use prompt::LivePrompt;
pub use registry::LiveVersionResolver;
pub use sandbox::LiveSandboxApi;
pub use shell::LiveShellExecutor;
