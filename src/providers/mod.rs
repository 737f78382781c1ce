// Summarization providers
//
// The report pipeline hands a finished prompt to a Summarizer and gets
// markdown back. OpenAI's chat-completion API is the only implementation;
// the trait keeps the pipeline testable without network access.

use anyhow::Result;
use async_trait::async_trait;

pub mod openai;
pub mod types;

pub use openai::OpenAIProvider;
pub use types::{ChatMessage, CompletionRequest};

/// Trait for LLM summarizers
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Send `prompt` as a single user message and return the generated text verbatim.
    async fn summarize(&self, prompt: &str) -> Result<String>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;

    /// Model the provider will ask for
    fn model(&self) -> &str;
}
