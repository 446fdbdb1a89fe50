//! Runtime settings read from the environment.

use std::path::PathBuf;

/// Default sandbox service.
pub const DEFAULT_BASE_URL: &str = "https://codesandbox.io";
/// Default package CDN used to resolve version ranges.
pub const DEFAULT_REGISTRY_URL: &str = "https://unpkg.com";
/// Credential file name under the home directory.
pub const CREDENTIALS_FILE_NAME: &str = ".sandship.json";

/// Where the tool talks to and keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Sandbox service base URL, without trailing slash.
    pub base_url: String,
    /// Package CDN base URL.
    pub registry_url: String,
    /// Path of the credential file.
    pub credentials_path: PathBuf,
    /// Record port interactions under this directory (`SANDSHIP_RECORD`).
    pub record_dir: Option<PathBuf>,
    /// Replay port interactions from the cassettes in this directory (`SANDSHIP_REPLAY`).
    pub replay_dir: Option<PathBuf>,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential path can be determined.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `SANDSHIP_JSON` nor `HOME` is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials_path = match get("SANDSHIP_JSON") {
            Some(path) => PathBuf::from(path),
            None => get("HOME")
                .or_else(|| get("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(CREDENTIALS_FILE_NAME))
                .ok_or("Could not determine the home directory; set SANDSHIP_JSON")?,
        };

        Ok(Self {
            base_url: get("SANDSHIP_BASE_URL").map_or_else(
                || DEFAULT_BASE_URL.to_string(),
                |url| url.trim_end_matches('/').to_string(),
            ),
            registry_url: get("SANDSHIP_REGISTRY_URL")
                .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            credentials_path,
            record_dir: get("SANDSHIP_RECORD").map(PathBuf::from),
            replay_dir: get("SANDSHIP_REPLAY").map(PathBuf::from),
        })
    }
}
