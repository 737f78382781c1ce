// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{load_config, parse_repo_list};
pub use settings::{Config, GithubConfig, JiraConfig, OpenAiConfig, Secret, SlackConfig};
