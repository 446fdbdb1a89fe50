//! `sandship deploy` command.

use std::io::Write;
use std::path::{Path, PathBuf};

use super::{confirm, login, say};
use crate::context::ServiceContext;
use crate::ingest::{deploy, DeployOutcome, IngestError};
use crate::settings::Settings;
use crate::store::{CredentialStore, SESSION_TTL_DAYS};
use crate::urls;

/// Execute the `deploy` command for the project at `path`.
///
/// Signs the operator in first if no user is stored. Relative paths are
/// taken from the current directory.
///
/// # Errors
///
/// Returns an error string if signing in, ingestion or the upload fails.
pub async fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    path: &Path,
    out: &mut dyn Write,
) -> Result<(), String> {
    let store = CredentialStore::new(ctx, &settings.credentials_path);

    let user = match store.user() {
        Some(user) => user,
        None => {
            say(out, "You need to sign in before you can deploy applications")?;
            if !confirm(ctx, "Do you want to sign in using GitHub?", false)? {
                return Ok(());
            }
            match login::sign_in(ctx, settings, out)? {
                Some(user) => user,
                None => return Ok(()),
            }
        }
    };

    if store.is_stale() {
        say(
            out,
            format!(
                "Warning: you signed in more than {SESSION_TTL_DAYS} days ago; \
                 run `sandship login` again if the upload is rejected."
            ),
        )?;
    }

    let project = absolute(path)?;
    say(out, format!("Deploying {} to {}", project.display(), settings.base_url))?;

    match deploy(ctx, &project, &user.jwt, out).await {
        Ok(DeployOutcome::Published(sandbox)) => {
            say(out, "Successfully created the sandbox, you can find the sandbox here:")?;
            say(out, urls::sandbox_url(&settings.base_url, &sandbox.id))
        }
        Ok(DeployOutcome::Declined(_)) => Ok(()),
        Err(err) => {
            report_validation(&err, out)?;
            Err(err.to_string())
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Could not determine the current directory: {e}"))?;
    Ok(cwd.join(path))
}

/// Lists validation messages beyond the one already in the error itself.
fn report_validation(err: &IngestError, out: &mut dyn Write) -> Result<(), String> {
    let messages = err.validation_messages();
    if messages.len() > 1 {
        for message in messages {
            say(out, format!("  {message}"))?;
        }
    }
    Ok(())
}
