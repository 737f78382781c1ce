// Report publishing
//
// A Publisher delivers the finished summary somewhere people will read it.
// Slack incoming webhooks are the only destination.

use anyhow::Result;
use async_trait::async_trait;

pub mod slack;

pub use slack::{format_message, SlackWebhook, SUMMARY_HEADER};

/// Trait for summary destinations
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Deliver `summary`. Called once per run; failures are not retried.
    async fn publish(&self, summary: &str) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &str;
}
