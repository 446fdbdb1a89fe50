//! Credential store: the signed-in user, persisted as JSON.
//!
//! The file stays small and human-readable:
//!
//! ```text
//! {
//!   "user": { "jwt": "...", "username": "..." },
//!   "lastUpdate": 1718447400000
//! }
//! ```
//!
//! Keys this tool does not know about are kept as they are.

use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::context::ServiceContext;

/// Days after which a stored session is considered stale.
pub const SESSION_TTL_DAYS: i64 = 14;

/// A signed-in account as handed over by the sign-in page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Bearer token for the sandbox API.
    pub jwt: String,
    /// Display name of the account.
    pub username: String,
    /// Any other profile fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Contents of the credential file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// The signed-in user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// When the user was last saved, in milliseconds since the epoch.
    #[serde(rename = "lastUpdate", default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<i64>,
    /// Unknown keys, preserved on write.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads and writes the credential file through `ctx.fs`.
pub struct CredentialStore<'a> {
    ctx: &'a ServiceContext,
    path: PathBuf,
}

impl<'a> CredentialStore<'a> {
    /// Creates a store over the credential file at `path`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, path: &Path) -> Self {
        Self { ctx, path: path.to_path_buf() }
    }

    /// Loads the stored config. A missing, unreadable or malformed file reads as empty.
    #[must_use]
    pub fn read(&self) -> StoredConfig {
        if !self.ctx.fs.exists(&self.path) {
            return StoredConfig::default();
        }
        self.ctx
            .fs
            .read_to_string(&self.path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// The stored user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().user
    }

    /// Stores `user`, stamping the update time from the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_user(&self, user: &User) -> Result<(), String> {
        let mut config = self.read();
        config.user = Some(user.clone());
        config.last_update = Some(self.ctx.clock.now().timestamp_millis());
        self.write(&config)
    }

    /// Forgets the stored user, keeping the rest of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn delete_user(&self) -> Result<(), String> {
        let mut config = self.read();
        config.user = None;
        self.write(&config)
    }

    /// Deletes the credential file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove_file(&self) -> Result<(), String> {
        self.ctx
            .fs
            .remove_file(&self.path)
            .map_err(|e| format!("Failed to remove {}: {e}", self.path.display()))
    }

    /// Whether the stored session is older than [`SESSION_TTL_DAYS`] or undated.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        let Some(last_update) = self.read().last_update else {
            return true;
        };
        let age = self.ctx.clock.now().timestamp_millis() - last_update;
        age > Duration::days(SESSION_TTL_DAYS).num_milliseconds()
    }

    fn write(&self, config: &StoredConfig) -> Result<(), String> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize credentials: {e}"))?;
        self.ctx
            .fs
            .write(&self.path, &json)
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))
    }
}
