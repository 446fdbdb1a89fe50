//! Core library entry for the `sandship` CLI.
//!
//! `sandship` maps a local web project (`package.json`, `public/index.html`
//! and `src/`) onto the records a remote sandbox service expects, resolves
//! its dependency ranges and uploads the result after the operator agrees.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod context;
pub mod ingest;
pub mod ports;
pub mod settings;
pub mod store;
pub mod urls;

#[cfg(test)]
pub(crate) mod testing;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print().map_err(|e| e.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    let command = cli.into_command().ok_or("Nothing to do; see `sandship --help`")?;
    commands::dispatch(&command)
}
