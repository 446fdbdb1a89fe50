//! Binary entrypoint for the `sandship` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    // Recording and replay are handled in commands::dispatch via SANDSHIP_RECORD / SANDSHIP_REPLAY.
    match sandship::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
