//! URLs on the sandbox service.

/// Endpoint that accepts new sandboxes.
#[must_use]
pub fn create_sandbox_url(base: &str) -> String {
    format!("{}/api/v1/sandboxes", base.trim_end_matches('/'))
}

/// Sign-in page that posts credentials back to a local port.
#[must_use]
pub fn login_url(base: &str, port: u16) -> String {
    format!("{}/cli/login?port={port}", base.trim_end_matches('/'))
}

/// Public page of a created sandbox.
#[must_use]
pub fn sandbox_url(base: &str, id: &str) -> String {
    format!("{}/s/{id}", base.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_on_the_base_are_ignored() {
        assert_eq!(
            create_sandbox_url("https://example.io/"),
            "https://example.io/api/v1/sandboxes"
        );
        assert_eq!(login_url("https://example.io", 4312), "https://example.io/cli/login?port=4312");
        assert_eq!(sandbox_url("https://example.io//", "k3x9"), "https://example.io/s/k3x9");
    }
}
