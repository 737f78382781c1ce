// Weekly Digest - summarize a week of GitHub and Jira work and post it to Slack
// Library exports

pub mod config;
pub mod errors;
pub mod http;
pub mod logging;
pub mod providers;
pub mod publish;
pub mod report;
pub mod sources;
