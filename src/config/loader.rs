// Configuration loader
// Builds a Config from environment variables

use anyhow::Result;

use super::constants::{
    DEFAULT_GITHUB_API_URL, DEFAULT_GITHUB_REPO, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
use super::settings::{Config, GithubConfig, JiraConfig, OpenAiConfig, Secret, SlackConfig};
use crate::errors::{self, ConfigError};

/// Load configuration from the process environment
pub fn load_config() -> Result<Config> {
    Config::from_env()
}

impl Config {
    /// Read every setting from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
            .map_err(|e| anyhow::anyhow!(errors::config_error_message(&e)))
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Empty (or whitespace-only) values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingVar(key));

        let github = GithubConfig {
            token: Secret::new(require("GH_PAT")?),
            username: require("GH_USERNAME")?,
            repos: parse_repo_list(get("GH_REPOS").as_deref())?,
            api_url: base_url(get("GH_API_URL"), DEFAULT_GITHUB_API_URL),
        };

        let jira = JiraConfig {
            email: require("JIRA_EMAIL")?,
            api_token: Secret::new(require("JIRA_API_TOKEN")?),
            base_url: base_url(Some(require("JIRA_BASE_URL")?), ""),
        };

        let openai = OpenAiConfig {
            api_key: Secret::new(require("OPENAI_API_KEY")?),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            base_url: base_url(get("OPENAI_BASE_URL"), DEFAULT_OPENAI_BASE_URL),
        };

        let slack = SlackConfig {
            webhook_url: Secret::new(require("SLACK_WEBHOOK_URL")?),
        };

        Ok(Self {
            github,
            jira,
            openai,
            slack,
        })
    }
}

/// Parse `GH_REPOS` into distinct `owner/repo` identifiers.
///
/// Entries are comma separated and trimmed; blanks are skipped. GitHub
/// matches `owner/repo` case-insensitively, so repeats are compared that way
/// and keep their first spelling and position. Falls back to the default
/// repository when nothing usable is left.
pub fn parse_repo_list(raw: Option<&str>) -> std::result::Result<Vec<String>, ConfigError> {
    let mut repos: Vec<String> = Vec::new();

    for entry in raw.unwrap_or_default().split(',').map(str::trim) {
        if entry.is_empty() {
            continue;
        }
        let valid = matches!(
            entry.split_once('/'),
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/')
        ) && !entry.contains(char::is_whitespace);
        if !valid {
            return Err(ConfigError::InvalidValue {
                var: "GH_REPOS",
                reason: format!("'{}' is not in owner/repo form", entry),
            });
        }
        if !repos.iter().any(|r| r.eq_ignore_ascii_case(entry)) {
            repos.push(entry.to_string());
        }
    }

    if repos.is_empty() {
        repos.push(DEFAULT_GITHUB_REPO.to_string());
    }
    Ok(repos)
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}
