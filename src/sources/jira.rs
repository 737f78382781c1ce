// Jira activity source
//
// One JQL search for issues the authenticated user finished this week.
// Any failure here propagates; there is no partial result.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::types::{ActivityItem, ActivityWindow, FetchedActivity};
use super::ActivitySource;
use crate::config::{JiraConfig, Secret};
use crate::http::{build_client, ensure_success};

/// Issues assigned to the caller, done, and touched in the last week.
pub const DONE_THIS_WEEK_JQL: &str =
    "assignee = currentUser() AND status = Done AND updated >= -7d";

/// Client for the Jira Cloud REST API
#[derive(Clone)]
pub struct JiraClient {
    client: Client,
    email: String,
    api_token: Secret,
    base_url: String,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            email: config.email.clone(),
            api_token: config.api_token.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Summaries of issues completed this week, in the order Jira returns them.
    ///
    /// The relative `-7d` bound in the JQL is evaluated by Jira itself.
    pub async fn completed_issues(&self) -> Result<Vec<ActivityItem>> {
        let url = format!("{}/rest/api/3/search", self.base_url);

        tracing::debug!("Searching Jira: {}", DONE_THIS_WEEK_JQL);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.email, Some(self.api_token.expose()))
            .header("Accept", "application/json")
            .query(&[("jql", DONE_THIS_WEEK_JQL), ("fields", "summary")])
            .send()
            .await
            .context("Failed to send search request to Jira")?;

        let search: SearchResponse = ensure_success(response, "Jira search")
            .await?
            .json()
            .await
            .context("Failed to parse Jira search response")?;

        tracing::debug!("Jira: {} completed issues", search.issues.len());

        Ok(search
            .issues
            .into_iter()
            .map(|issue| ActivityItem::jira(issue.fields.summary))
            .collect())
    }
}

#[async_trait]
impl ActivitySource for JiraClient {
    async fn fetch(&self, _window: &ActivityWindow) -> Result<FetchedActivity> {
        Ok(FetchedActivity::from_items(self.completed_issues().await?))
    }

    fn name(&self) -> &str {
        "jira"
    }
}

// Jira API types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    issues: Vec<Issue>,
}

#[derive(Debug, Deserialize)]
struct Issue {
    fields: IssueFields,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_uses_summary_not_key() {
        let body = r#"{"issues":[{"key":"WEB-42","fields":{"summary":"Update onboarding copy"}}]}"#;
        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let item = ActivityItem::jira(parsed.issues.into_iter().next().unwrap().fields.summary);

        assert_eq!(item.to_string(), "Jira: Update onboarding copy");
        assert!(!item.to_string().contains("WEB-42"));
    }
}
