//! Live adapter for the `SandboxApi` port.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ports::{CreateFuture, CreatedSandbox, SandboxApi, SandboxApiError, SandboxDraft};
use crate::urls;

/// Creates sandboxes through the service's REST API.
pub struct LiveSandboxApi {
    client: Client,
    base_url: String,
}

impl LiveSandboxApi {
    /// Creates a client for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { client: Client::new(), base_url: base_url.into() }
    }
}

#[derive(Serialize)]
struct CreateRequest<'a> {
    sandbox: &'a SandboxDraft,
}

#[derive(Deserialize)]
struct CreateResponse {
    data: CreatedSandbox,
}

#[derive(Deserialize)]
struct ErrorResponse {
    errors: Value,
}

/// Collects every string found in an `errors` payload, in order.
fn flatten_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|item| flatten_messages(item, out)),
        Value::Object(map) => map.values().for_each(|item| flatten_messages(item, out)),
        _ => {}
    }
}

impl SandboxApi for LiveSandboxApi {
    fn create_sandbox(&self, draft: &SandboxDraft, token: &str) -> CreateFuture<'_> {
        let url = urls::create_sandbox_url(&self.base_url);
        let request =
            self.client.post(url).bearer_auth(token).json(&CreateRequest { sandbox: draft });

        Box::pin(async move {
            let response = request.send().await.map_err(|e| {
                SandboxApiError::new(format!("Could not reach the sandbox service: {e}"))
            })?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                SandboxApiError::new(format!("Failed to read the sandbox service response: {e}"))
            })?;

            if !status.is_success() {
                let mut validation = Vec::new();
                if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
                    flatten_messages(&parsed.errors, &mut validation);
                }
                let message = validation
                    .first()
                    .cloned()
                    .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
                return Err(SandboxApiError { message, validation });
            }

            let created: CreateResponse = serde_json::from_str(&body).map_err(|e| {
                SandboxApiError::new(format!("Unexpected response from the sandbox service: {e}"))
            })?;
            Ok(created.data)
        })
    }
}
