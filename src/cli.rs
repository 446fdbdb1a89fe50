//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `sandship`.
#[derive(Debug, Parser)]
#[command(
    name = "sandship",
    version,
    about = "Upload a local web project as a public sandbox",
    args_conflicts_with_subcommands = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Project to deploy; shorthand for `sandship deploy <PATH>`.
    pub path: Option<PathBuf>,
}

impl Cli {
    /// The command to run, treating a bare path as `deploy`.
    #[must_use]
    pub fn into_command(self) -> Option<Command> {
        self.command.or_else(|| self.path.map(|path| Command::Deploy { path }))
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Deploy a project to the sandbox service (default).
    Deploy {
        /// Project directory containing `package.json`.
        path: PathBuf,
    },
    /// Sign in to the sandbox service.
    Login,
}
