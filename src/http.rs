// Shared HTTP helpers

use anyhow::{Context, Result};
use reqwest::{Client, Response};

use crate::config::constants::USER_AGENT;

/// Build the HTTP client used by every service client.
///
/// Timeouts are left at the transport defaults.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Turn a non-2xx response into an error carrying status and body.
pub async fn ensure_success(response: Response, service: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_body = response.text().await.unwrap_or_default();
    anyhow::bail!(
        "{} request failed\n\nStatus: {}\nBody: {}",
        service,
        status,
        error_body
    );
}
