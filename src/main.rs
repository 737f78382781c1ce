// Weekly Digest
// Main entry point

use anyhow::Result;
use clap::Parser;

use weekly_digest::config::load_config;
use weekly_digest::logging;
use weekly_digest::report::{ReportPipeline, RunOptions};
use weekly_digest::sources::ActivityWindow;

/// Summarize the last week of GitHub and Jira activity and post it to Slack.
///
/// Credentials and targets are read from the environment (GH_PAT,
/// GH_USERNAME, GH_REPOS, JIRA_EMAIL, JIRA_API_TOKEN, JIRA_BASE_URL,
/// OPENAI_API_KEY, SLACK_WEBHOOK_URL).
#[derive(Debug, Parser)]
#[command(name = "weekly-digest", version, about)]
struct Cli {
    /// Generate and print the summary without posting it to Slack
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config()?;
    tracing::debug!(
        "Reporting on {} with model {}",
        config.github.repos.join(", "),
        config.openai.model
    );

    let pipeline = ReportPipeline::from_config(&config)?;
    let options = RunOptions {
        publish: !cli.dry_run,
    };

    let outcome = pipeline.run(&ActivityWindow::last_week(), options).await?;

    for warning in &outcome.warnings {
        tracing::warn!("Summary is missing activity from {}", warning);
    }
    println!("{}", outcome.summary);

    Ok(())
}
