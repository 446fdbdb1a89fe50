//! Live adapter for the `VersionResolver` port backed by a package CDN.

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::ports::{PortError, ResolveFuture, VersionResolver};

/// Resolves ranges by fetching `{registry}/{name}@{range}/package.json`.
///
/// The CDN redirects a range to the best matching published version; the
/// `version` field of the manifest it serves is the answer.
pub struct LiveVersionResolver {
    client: Client,
    registry: String,
}

impl LiveVersionResolver {
    /// Creates a resolver against the given registry base URL.
    #[must_use]
    pub fn new(registry: impl Into<String>) -> Self {
        Self { client: Client::new(), registry: registry.into() }
    }

    fn manifest_url(&self, name: &str, range: &str) -> Result<Url, PortError> {
        let mut url = Url::parse(&self.registry)
            .map_err(|e| format!("invalid registry URL {}: {e}", self.registry))?;
        let spec = format!("{name}@{range}");
        url.path_segments_mut()
            .map_err(|()| format!("registry URL cannot have a path: {}", self.registry))?
            .pop_if_empty()
            .extend(spec.split('/'))
            .push("package.json");
        Ok(url)
    }
}

#[derive(Deserialize)]
struct PublishedManifest {
    version: String,
}

impl VersionResolver for LiveVersionResolver {
    fn resolve(&self, name: &str, range: &str) -> ResolveFuture<'_> {
        let name = name.to_string();
        let range = range.to_string();

        Box::pin(async move {
            let url = self.manifest_url(&name, &range)?;

            let response = self.client.get(url).send().await.map_err(|e| -> PortError {
                format!("registry request failed: {e}").into()
            })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(format!("no version of {name} matches {range}").into());
            }
            if !status.is_success() {
                return Err(format!("registry returned status {}", status.as_u16()).into());
            }

            let manifest: PublishedManifest = response.json().await.map_err(|e| -> PortError {
                format!("failed to parse manifest of {name}: {e}").into()
            })?;
            Ok(manifest.version)
        })
    }
}
