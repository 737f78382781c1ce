// Integration tests for the report pipeline
//
// Mock sources, summarizer and publisher cover stage ordering and the
// failure rules; the last test drives the real clients against mockito.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use weekly_digest::config::{
    Config, GithubConfig, JiraConfig, OpenAiConfig, Secret, SlackConfig,
};
use weekly_digest::providers::Summarizer;
use weekly_digest::publish::{format_message, Publisher};
use weekly_digest::report::{build_prompt, ReportPipeline, RunOptions};
use weekly_digest::sources::{
    ActivityItem, ActivitySource, ActivityWindow, FetchWarning, FetchedActivity,
};

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

struct StaticSource {
    name: &'static str,
    activity: FetchedActivity,
}

#[async_trait]
impl ActivitySource for StaticSource {
    async fn fetch(&self, _window: &ActivityWindow) -> Result<FetchedActivity> {
        Ok(self.activity.clone())
    }

    fn name(&self) -> &str {
        self.name
    }
}

struct FailingSource;

#[async_trait]
impl ActivitySource for FailingSource {
    async fn fetch(&self, _window: &ActivityWindow) -> Result<FetchedActivity> {
        bail!("Jira search request failed\n\nStatus: 503 Service Unavailable")
    }

    fn name(&self) -> &str {
        "jira"
    }
}

#[derive(Default)]
struct RecordingSummarizer {
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Summarizer for RecordingSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.fail {
            bail!("OpenAI API request failed\n\nStatus: 401 Unauthorized");
        }
        Ok("- Shipped dark mode.".to_string())
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

#[derive(Default)]
struct RecordingPublisher {
    calls: AtomicUsize,
    published: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, summary: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("Slack webhook request failed\n\nStatus: 500 Internal Server Error");
        }
        self.published.lock().unwrap().push(summary.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

fn window() -> ActivityWindow {
    ActivityWindow::trailing(Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap(), 7)
}

fn github_source(warnings: Vec<FetchWarning>) -> Arc<StaticSource> {
    Arc::new(StaticSource {
        name: "github",
        activity: FetchedActivity {
            items: vec![
                ActivityItem::pull_request("Add dark mode"),
                ActivityItem::commit("Fix crash on startup"),
            ],
            warnings,
        },
    })
}

fn jira_source() -> Arc<StaticSource> {
    Arc::new(StaticSource {
        name: "jira",
        activity: FetchedActivity::from_items(vec![ActivityItem::jira("Update onboarding copy")]),
    })
}

// ---------------------------------------------------------------------------
// Stage ordering and failure rules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_merges_sources_and_publishes_summary() {
    let summarizer = Arc::new(RecordingSummarizer::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = ReportPipeline::new(
        github_source(vec![]),
        jira_source(),
        summarizer.clone(),
        publisher.clone(),
    );

    let outcome = pipeline.run(&window(), RunOptions::default()).await.unwrap();

    let lines: Vec<String> = outcome.items.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "PR: Add dark mode",
            "Commit: Fix crash on startup",
            "Jira: Update onboarding copy",
        ]
    );

    let prompts = summarizer.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("PR: Add dark mode\nCommit: Fix crash on startup\nJira: Update onboarding copy\n"));
    assert_eq!(prompts[0], outcome.prompt);

    assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(*publisher.published.lock().unwrap(), vec!["- Shipped dark mode."]);
    assert_eq!(outcome.summary, "- Shipped dark mode.");
    assert!(outcome.published);
}

#[tokio::test]
async fn test_tracker_failure_aborts_before_prompt() {
    let summarizer = Arc::new(RecordingSummarizer::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = ReportPipeline::new(
        github_source(vec![]),
        Arc::new(FailingSource),
        summarizer.clone(),
        publisher.clone(),
    );

    let err = pipeline.run(&window(), RunOptions::default()).await.unwrap_err();

    let message = format!("{:#}", err);
    assert!(message.starts_with("Fetching activity failed"));
    assert!(message.contains("Failed to fetch jira activity"));
    assert!(summarizer.prompts.lock().unwrap().is_empty());
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_source_warnings_do_not_abort() {
    let warning = FetchWarning {
        target: "acme/gone".to_string(),
        message: "GitHub commit listing request failed\n\nStatus: 404 Not Found".to_string(),
    };
    let summarizer = Arc::new(RecordingSummarizer::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = ReportPipeline::new(
        github_source(vec![warning.clone()]),
        jira_source(),
        summarizer.clone(),
        publisher.clone(),
    );

    let outcome = pipeline.run(&window(), RunOptions::default()).await.unwrap();

    assert_eq!(outcome.warnings, vec![warning]);
    assert_eq!(outcome.items.len(), 3);
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_summarizer_failure_skips_publishing() {
    let summarizer = Arc::new(RecordingSummarizer {
        fail: true,
        ..Default::default()
    });
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = ReportPipeline::new(
        github_source(vec![]),
        jira_source(),
        summarizer.clone(),
        publisher.clone(),
    );

    let err = pipeline.run(&window(), RunOptions::default()).await.unwrap_err();

    assert!(format!("{:#}", err).starts_with("Summarizing failed"));
    assert_eq!(summarizer.prompts.lock().unwrap().len(), 1);
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_publish_failure_is_attempted_once() {
    let publisher = Arc::new(RecordingPublisher {
        fail: true,
        ..Default::default()
    });
    let pipeline = ReportPipeline::new(
        github_source(vec![]),
        jira_source(),
        Arc::new(RecordingSummarizer::default()),
        publisher.clone(),
    );

    let err = pipeline.run(&window(), RunOptions::default()).await.unwrap_err();

    assert!(format!("{:#}", err).starts_with("Publishing failed"));
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dry_run_does_not_publish() {
    let publisher = Arc::new(RecordingPublisher::default());
    let pipeline = ReportPipeline::new(
        github_source(vec![]),
        jira_source(),
        Arc::new(RecordingSummarizer::default()),
        publisher.clone(),
    );

    let outcome = pipeline
        .run(&window(), RunOptions { publish: false })
        .await
        .unwrap();

    assert!(!outcome.published);
    assert_eq!(outcome.summary, "- Shipped dark mode.");
    assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
}

// ---------------------------------------------------------------------------
// End to end against mocked services
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_end_to_end_with_real_clients() {
    let mut server = Server::new_async().await;
    let reply = "- Customers can now switch to dark mode.\n- The app no longer crashes on launch.\n- New users see clearer onboarding.";

    server
        .mock("GET", "/github/search/issues")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items":[{"title":"Add dark mode"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/github/repos/acme/web/commits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"commit":{"message":"Fix crash on startup\n\nRoot cause was a nil config"}}]"#)
        .create_async()
        .await;
    server
        .mock("GET", "/jira/rest/api/3/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"issues":[{"key":"WEB-9","fields":{"summary":"Update onboarding copy"}}]}"#)
        .create_async()
        .await;

    let expected_prompt = build_prompt(&[
        ActivityItem::pull_request("Add dark mode"),
        ActivityItem::commit("Fix crash on startup"),
        ActivityItem::jira("Update onboarding copy"),
    ]);
    let completion = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-4",
            "messages": [{"role": "user", "content": expected_prompt}],
            "n": 1
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"role": "assistant", "content": reply}}]}).to_string())
        .expect(1)
        .create_async()
        .await;
    let hook = server
        .mock("POST", "/slack/hook")
        .match_body(Matcher::Json(json!({ "text": format_message(reply) })))
        .with_status(200)
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;

    let config = Config {
        github: GithubConfig {
            token: Secret::new("ghp_test"),
            username: "octocat".to_string(),
            repos: vec!["acme/web".to_string()],
            api_url: format!("{}/github", server.url()),
        },
        jira: JiraConfig {
            email: "dev@acme.io".to_string(),
            api_token: Secret::new("jira-token"),
            base_url: format!("{}/jira", server.url()),
        },
        openai: OpenAiConfig {
            api_key: Secret::new("sk-test"),
            model: "gpt-4".to_string(),
            base_url: format!("{}/openai", server.url()),
        },
        slack: SlackConfig {
            webhook_url: Secret::new(format!("{}/slack/hook", server.url())),
        },
    };

    let outcome = ReportPipeline::from_config(&config)
        .unwrap()
        .run(&window(), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.prompt, expected_prompt);
    assert_eq!(outcome.summary, reply);
    assert!(format_message(&outcome.summary).starts_with("🤖 *Weekly Work Summary*:\n"));
    completion.assert_async().await;
    hook.assert_async().await;
}
