// Slack incoming-webhook publisher

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::Publisher;
use crate::config::{Secret, SlackConfig};
use crate::http::{build_client, ensure_success};

/// Prepended to every summary posted to the channel
pub const SUMMARY_HEADER: &str = "🤖 *Weekly Work Summary*:\n";

/// Webhook message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    pub text: String,
}

/// Header followed by the summary, unmodified
pub fn format_message(summary: &str) -> String {
    format!("{}{}", SUMMARY_HEADER, summary)
}

/// Posts summaries to a Slack incoming webhook
#[derive(Clone)]
pub struct SlackWebhook {
    client: Client,
    webhook_url: Secret,
}

impl SlackWebhook {
    pub fn new(config: &SlackConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            webhook_url: config.webhook_url.clone(),
        })
    }
}

#[async_trait]
impl Publisher for SlackWebhook {
    async fn publish(&self, summary: &str) -> Result<()> {
        let payload = WebhookPayload {
            text: format_message(summary),
        };

        let response = self
            .client
            .post(self.webhook_url.expose())
            .json(&payload)
            .send()
            .await
            // The webhook URL is a credential; keep it out of the error text.
            .map_err(|e| e.without_url())
            .context("Failed to send summary to Slack webhook")?;

        ensure_success(response, "Slack webhook").await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "slack"
    }
}
