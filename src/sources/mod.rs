// Activity sources
//
// Each source turns one external service into a list of ActivityItems for
// the trailing window. The pipeline only talks to the trait, so tests can
// swap in canned sources.

use anyhow::Result;
use async_trait::async_trait;

pub mod github;
pub mod jira;
pub mod types;

pub use github::GithubClient;
pub use jira::JiraClient;
pub use types::{ActivityItem, ActivityKind, ActivityWindow, FetchWarning, FetchedActivity};

/// Trait for anything that can report a user's activity
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Fetch activity inside `window`.
    ///
    /// Returning `Err` aborts the run. Problems the source can tolerate are
    /// reported through `FetchedActivity::warnings` instead.
    async fn fetch(&self, window: &ActivityWindow) -> Result<FetchedActivity>;

    /// Short name for logs (e.g. "github", "jira")
    fn name(&self) -> &str;
}
