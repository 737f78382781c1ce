// Report pipeline: fetch, summarize, publish
//
// Idle → Fetching (GitHub ‖ Jira) → BuildingPrompt → Summarizing →
// Publishing → Done. The first unrecovered error ends the run.

use anyhow::{Context, Result};
use std::fmt;
use std::sync::Arc;

use super::prompt::build_prompt;
use crate::config::Config;
use crate::providers::{OpenAIProvider, Summarizer};
use crate::publish::{Publisher, SlackWebhook};
use crate::sources::{
    ActivityItem, ActivitySource, ActivityWindow, FetchWarning, FetchedActivity, GithubClient,
    JiraClient,
};

/// Pipeline stages, used to label progress logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    BuildingPrompt,
    Summarizing,
    Publishing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Fetching => "Fetching activity",
            Stage::BuildingPrompt => "Building prompt",
            Stage::Summarizing => "Summarizing",
            Stage::Publishing => "Publishing",
        };
        f.write_str(label)
    }
}

/// Per-run switches
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Post the summary to the publisher (false for dry runs)
    pub publish: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { publish: true }
    }
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Merged activity: source-control items, then tracker items
    pub items: Vec<ActivityItem>,
    pub warnings: Vec<FetchWarning>,
    pub prompt: String,
    pub summary: String,
    pub published: bool,
}

/// The weekly report run.
///
/// Holds one source-control source, one tracker source, a summarizer and a
/// publisher. Nothing is kept between runs.
pub struct ReportPipeline {
    source_control: Arc<dyn ActivitySource>,
    tracker: Arc<dyn ActivitySource>,
    summarizer: Arc<dyn Summarizer>,
    publisher: Arc<dyn Publisher>,
}

impl ReportPipeline {
    pub fn new(
        source_control: Arc<dyn ActivitySource>,
        tracker: Arc<dyn ActivitySource>,
        summarizer: Arc<dyn Summarizer>,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            source_control,
            tracker,
            summarizer,
            publisher,
        }
    }

    /// Build the production pipeline: GitHub, Jira, OpenAI and Slack.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Arc::new(GithubClient::new(&config.github)?),
            Arc::new(JiraClient::new(&config.jira)?),
            Arc::new(OpenAIProvider::new(&config.openai)?),
            Arc::new(SlackWebhook::new(&config.slack)?),
        ))
    }

    /// Run every stage once for `window`.
    pub async fn run(&self, window: &ActivityWindow, options: RunOptions) -> Result<RunOutcome> {
        // ── 1. Fetch both sources concurrently ──────────────────────────────
        tracing::info!(
            "{} from {} and {} since {}",
            Stage::Fetching,
            self.source_control.name(),
            self.tracker.name(),
            window.search_date()
        );
        let (source_control, tracker) = futures::try_join!(
            fetch_from(self.source_control.as_ref(), window),
            fetch_from(self.tracker.as_ref(), window),
        )
        .with_context(|| format!("{} failed", Stage::Fetching))?;

        let mut items = source_control.items;
        items.extend(tracker.items);
        let mut warnings = source_control.warnings;
        warnings.extend(tracker.warnings);

        tracing::info!(
            "Collected {} activity items ({} warnings)",
            items.len(),
            warnings.len()
        );

        // ── 2. Build the prompt ─────────────────────────────────────────────
        tracing::info!("{}", Stage::BuildingPrompt);
        let prompt = build_prompt(&items);

        // ── 3. Summarize ────────────────────────────────────────────────────
        tracing::info!(
            "{} with {} ({})",
            Stage::Summarizing,
            self.summarizer.name(),
            self.summarizer.model()
        );
        let summary = self
            .summarizer
            .summarize(&prompt)
            .await
            .with_context(|| format!("{} failed", Stage::Summarizing))?;

        // ── 4. Publish ──────────────────────────────────────────────────────
        let published = if options.publish {
            tracing::info!("{} to {}", Stage::Publishing, self.publisher.name());
            self.publisher
                .publish(&summary)
                .await
                .with_context(|| format!("{} failed", Stage::Publishing))?;
            true
        } else {
            tracing::info!("Dry run: not publishing to {}", self.publisher.name());
            false
        };

        Ok(RunOutcome {
            items,
            warnings,
            prompt,
            summary,
            published,
        })
    }
}

async fn fetch_from(source: &dyn ActivitySource, window: &ActivityWindow) -> Result<FetchedActivity> {
    let activity = source
        .fetch(window)
        .await
        .with_context(|| format!("Failed to fetch {} activity", source.name()))?;
    tracing::debug!("{}: {} items", source.name(), activity.items.len());
    Ok(activity)
}
