// Activity types shared by every source
//
// Sources produce ActivityItems; the prompt builder only ever sees their
// rendered text.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::fmt;

use crate::config::constants::WINDOW_DAYS;

/// Where an activity item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    PullRequest,
    Commit,
    Jira,
}

impl ActivityKind {
    /// Prefix used when the item is rendered
    pub fn tag(&self) -> &'static str {
        match self {
            ActivityKind::PullRequest => "PR",
            ActivityKind::Commit => "Commit",
            ActivityKind::Jira => "Jira",
        }
    }
}

/// One unit of work, rendered as `"<tag>: <text>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub text: String,
}

impl ActivityItem {
    pub fn new(kind: ActivityKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn pull_request(title: impl Into<String>) -> Self {
        Self::new(ActivityKind::PullRequest, title)
    }

    /// Build a commit item from a full commit message, keeping only its first
    /// line with trailing whitespace removed.
    pub fn commit(message: &str) -> Self {
        let first_line = message.lines().next().unwrap_or_default().trim_end();
        Self::new(ActivityKind::Commit, first_line)
    }

    pub fn jira(summary: impl Into<String>) -> Self {
        Self::new(ActivityKind::Jira, summary)
    }
}

impl fmt::Display for ActivityItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.tag(), self.text)
    }
}

/// The trailing window a run reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ActivityWindow {
    /// Window of `days` days ending at `end`
    pub fn trailing(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// The standard seven-day window ending now
    pub fn last_week() -> Self {
        Self::trailing(Utc::now(), WINDOW_DAYS)
    }

    /// Start date in the `YYYY-MM-DD` form GitHub search qualifiers expect
    pub fn search_date(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    /// Start instant as RFC 3339, for `since` parameters
    pub fn since_timestamp(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// A recoverable problem hit while fetching; the run continues without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    /// What was being fetched, e.g. a repository identifier
    pub target: String,
    pub message: String,
}

impl fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.message)
    }
}

/// Items from one source plus any warnings raised along the way
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedActivity {
    pub items: Vec<ActivityItem>,
    pub warnings: Vec<FetchWarning>,
}

impl FetchedActivity {
    pub fn from_items(items: Vec<ActivityItem>) -> Self {
        Self {
            items,
            warnings: Vec::new(),
        }
    }
}
