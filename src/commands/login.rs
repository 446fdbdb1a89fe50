//! `sandship login` command.

use std::io::Write;

use super::{confirm, say};
use crate::context::ServiceContext;
use crate::settings::Settings;
use crate::store::{CredentialStore, User};
use crate::urls;

/// Execute the `login` command, offering to sign out an existing user first.
///
/// # Errors
///
/// Returns an error string if the credential file cannot be updated or the
/// sign-in fails.
pub fn run(ctx: &ServiceContext, settings: &Settings, out: &mut dyn Write) -> Result<(), String> {
    let store = CredentialStore::new(ctx, &settings.credentials_path);

    if store.user().is_some() {
        if !confirm(ctx, "You are already logged in, would you like to sign out first?", false)? {
            return Ok(());
        }
        store.delete_user()?;
    }

    sign_in(ctx, settings, out).map(|_| ())
}

/// Signs in through the browser and stores the user.
///
/// Returns `None` if the operator chose not to open the browser.
///
/// # Errors
///
/// Returns an error string if no valid user arrives or it cannot be saved.
pub fn sign_in(
    ctx: &ServiceContext,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<Option<User>, String> {
    if !confirm(ctx, "We will open the sandbox service to finish the login process", false)? {
        return Ok(None);
    }

    let body = ctx
        .handshake
        .receive_credentials(&mut |port| {
            open_browser(ctx, &urls::login_url(&settings.base_url, port), &mut *out)
        })
        .map_err(|e| format!("Something went wrong while signing in: {e}"))?;

    let user: User = serde_json::from_str(&body)
        .map_err(|e| format!("Something went wrong while signing in: invalid user data: {e}"))?;

    CredentialStore::new(ctx, &settings.credentials_path).save_user(&user)?;
    say(out, format!("Successfully signed in as {}!", user.username))?;
    Ok(Some(user))
}

fn open_browser(ctx: &ServiceContext, url: &str, out: &mut dyn Write) -> Result<(), String> {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    say(out, format!("Opening {url}"))?;

    let opened = ctx
        .shell
        .run(&format!("{opener} {}", shell_quote(url)))
        .is_ok_and(|output| output.exit_code == 0);
    if !opened {
        say(out, "Could not open a browser; open the address above to continue.")?;
    }
    Ok(())
}

/// Quotes `arg` as one word for `sh`.
fn shell_quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}
