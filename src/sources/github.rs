// GitHub activity source
//
// Collects merged pull requests (one search query across every configured
// repository) and per-repository commit listings for the configured author.
//
// Failure handling is deliberately uneven: the pull-request search is
// critical and propagates, while a commit listing that fails for one
// repository is logged, recorded as a warning and skipped.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;

use super::types::{ActivityItem, ActivityWindow, FetchWarning, FetchedActivity};
use super::ActivitySource;
use crate::config::{GithubConfig, Secret};
use crate::http::{build_client, ensure_success};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const PAGE_SIZE: &str = "100";

/// Client for the GitHub REST API, scoped to one author and repository set
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    token: Secret,
    username: String,
    repos: Vec<String>,
    api_url: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            token: config.token.clone(),
            username: config.username.clone(),
            repos: config.repos.clone(),
            api_url: config.api_url.clone(),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.token.expose())
            .header("Accept", GITHUB_ACCEPT)
    }

    /// Pull requests by the author merged on or after the window start.
    pub async fn merged_pull_requests(&self, window: &ActivityWindow) -> Result<Vec<ActivityItem>> {
        let query = pull_request_query(&self.username, &self.repos, &window.search_date());
        let url = format!("{}/search/issues", self.api_url);

        tracing::debug!("Searching GitHub pull requests: {}", query);

        let response = self
            .get(&url)
            .query(&[("q", query.as_str()), ("per_page", PAGE_SIZE)])
            .send()
            .await
            .context("Failed to send pull request search to GitHub")?;

        let search: SearchResponse = ensure_success(response, "GitHub search")
            .await?
            .json()
            .await
            .context("Failed to parse GitHub search response")?;

        Ok(search
            .items
            .into_iter()
            .map(|pr| ActivityItem::pull_request(pr.title))
            .collect())
    }

    /// Commits by the author in `repo` since the window start.
    pub async fn commits(&self, repo: &str, window: &ActivityWindow) -> Result<Vec<ActivityItem>> {
        let url = format!("{}/repos/{}/commits", self.api_url, repo);
        let since = window.since_timestamp();

        tracing::debug!("Listing commits for {} since {}", repo, since);

        let response = self
            .get(&url)
            .query(&[
                ("author", self.username.as_str()),
                ("since", since.as_str()),
                ("per_page", PAGE_SIZE),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to list commits for {}", repo))?;

        let commits: Vec<CommitEntry> = ensure_success(response, "GitHub commit listing")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse commit listing for {}", repo))?;

        Ok(commits
            .iter()
            .map(|entry| ActivityItem::commit(&entry.commit.message))
            .collect())
    }

    /// Pull requests first, then commits grouped by repository.
    ///
    /// A repository whose commits cannot be listed contributes nothing and
    /// shows up in `warnings`; the pull request search has no such fallback.
    pub async fn fetch_activity(&self, window: &ActivityWindow) -> Result<FetchedActivity> {
        let mut activity = FetchedActivity::from_items(self.merged_pull_requests(window).await?);
        let pr_count = activity.items.len();

        for repo in &self.repos {
            match self.commits(repo, window).await {
                Ok(items) => activity.items.extend(items),
                Err(e) => {
                    tracing::warn!("Skipping commits for {}: {:#}", repo, e);
                    activity.warnings.push(FetchWarning {
                        target: repo.clone(),
                        message: format!("{:#}", e),
                    });
                }
            }
        }

        tracing::debug!(
            "GitHub: {} pull requests, {} commits, {} repositories skipped",
            pr_count,
            activity.items.len() - pr_count,
            activity.warnings.len()
        );

        Ok(activity)
    }
}

#[async_trait]
impl ActivitySource for GithubClient {
    async fn fetch(&self, window: &ActivityWindow) -> Result<FetchedActivity> {
        self.fetch_activity(window).await
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Search query for merged pull requests by `username` since `since_date`.
///
/// Emits one `repo:` qualifier per distinct repository, in first-seen order.
/// Repository names are compared case-insensitively, as GitHub does.
pub fn pull_request_query(username: &str, repos: &[String], since_date: &str) -> String {
    let mut query = format!("is:pr is:merged author:{} merged:>={}", username, since_date);
    let mut seen: Vec<&str> = Vec::with_capacity(repos.len());

    for repo in repos {
        if seen.iter().any(|s| s.eq_ignore_ascii_case(repo)) {
            continue;
        }
        seen.push(repo);
        query.push_str(" repo:");
        query.push_str(repo);
    }

    query
}

// GitHub API types

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}
