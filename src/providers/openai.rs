// OpenAI API provider implementation
//
// Sends the report prompt to the chat-completion endpoint and returns the
// first choice's text untouched. One attempt only: errors go straight back
// to the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use super::types::{CompletionRequest, CompletionResponse};
use super::Summarizer;
use crate::config::{OpenAiConfig, Secret};
use crate::http::{build_client, ensure_success};

/// OpenAI chat-completion provider
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: Secret,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    async fn send_completion(&self, request: &CompletionRequest) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(
            "Sending {}-character prompt to OpenAI ({})",
            request.messages.iter().map(|m| m.content.len()).sum::<usize>(),
            request.model
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let completion: CompletionResponse = ensure_success(response, "OpenAI API")
            .await?
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        tracing::debug!(
            "Received completion {}",
            completion.id.as_deref().unwrap_or("(no id)")
        );

        let choice = completion
            .choices
            .into_iter()
            .next()
            .context("OpenAI returned no choices in response")?;

        if let Some(reason) = choice.finish_reason.as_deref() {
            if reason != "stop" {
                tracing::warn!("OpenAI completion finished with reason '{}'", reason);
            }
        }

        choice
            .message
            .content
            .context("OpenAI response choice has no text content")
    }
}

#[async_trait]
impl Summarizer for OpenAIProvider {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest::single_prompt(self.model.clone(), prompt);
        self.send_completion(&request).await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: Secret::new("test-key"),
            model: "gpt-4".to_string(),
            base_url: "https://api.openai.com".to_string(),
        }
    }

    #[test]
    fn test_openai_provider_creation() {
        assert!(OpenAIProvider::new(&config()).is_ok());
    }

    #[test]
    fn test_model_comes_from_config() {
        let mut config = config();
        config.model = "gpt-4o".to_string();
        let provider = OpenAIProvider::new(&config).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o");
    }
}
