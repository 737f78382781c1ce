// Configuration structs

use std::fmt;

/// A credential that must never reach logs.
///
/// `Debug` and `Display` both print `[REDACTED]`; call [`Secret::expose`]
/// at the single point where the value goes on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// GitHub access and author filter
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Personal access token (`GH_PAT`)
    pub token: Secret,
    /// Author whose pull requests and commits are collected (`GH_USERNAME`)
    pub username: String,
    /// Distinct `owner/repo` identifiers, in configuration order
    pub repos: Vec<String>,
    /// REST API base URL, no trailing slash
    pub api_url: String,
}

/// Jira Cloud access
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub email: String,
    pub api_token: Secret,
    /// Site base URL, e.g. `https://acme.atlassian.net`, no trailing slash
    pub base_url: String,
}

/// Chat-completion service settings
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret,
    pub model: String,
    /// API base URL, no trailing slash
    pub base_url: String,
}

/// Chat webhook target
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// The webhook URL embeds its own credential, so it is a secret too.
    pub webhook_url: Secret,
}

/// Everything a run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub github: GithubConfig,
    pub jira: JiraConfig,
    pub openai: OpenAiConfig,
    pub slack: SlackConfig,
}
