//! Command dispatch and handlers.

pub mod deploy;
pub mod login;

use std::io::{self, Write};

use tokio::runtime::Builder;

use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::context::ServiceContext;
use crate::ports::PortError;
use crate::settings::Settings;

/// Dispatch a parsed command to its handler.
///
/// When `SANDSHIP_RECORD` is set to a directory path, all port interactions
/// are recorded to per-port cassette files under that directory. When
/// `SANDSHIP_REPLAY` points at such a directory, the ports it has cassettes
/// for are replayed instead of touching the outside world.
///
/// # Errors
///
/// Returns an error string if settings cannot be read or the command fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let settings = Settings::from_env()?;

    let (mut ctx, session) = match &settings.record_dir {
        Some(dir) => {
            let (ctx, session) = ServiceContext::recording_at(&settings, dir)?;
            (ctx, Some(session))
        }
        None => (ServiceContext::live(&settings), None),
    };
    if let Some(dir) = &settings.replay_dir {
        ctx = ServiceContext::replaying_over(&CassetteConfig::from_dir(dir), ctx)?;
    }

    let result = dispatch_with_context(command, &ctx, &settings, &mut io::stdout().lock());

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context, writing operator output to `out`.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Deploy { path } => {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| format!("Failed to start the async runtime: {e}"))?;
            runtime.block_on(deploy::run(ctx, settings, path, out))
        }
        Command::Login => login::run(ctx, settings, out),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}

fn confirm(ctx: &ServiceContext, question: &str, default: bool) -> Result<bool, String> {
    ctx.prompt
        .confirm(question, default)
        .map_err(|e: PortError| format!("Could not ask for confirmation: {e}"))
}

fn say(out: &mut dyn Write, line: impl std::fmt::Display) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|e| format!("Failed to write output: {e}"))
}
