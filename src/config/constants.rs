// Project-wide constants
//
// Endpoint defaults and fixed values live here so each has one source of
// truth. Import via `use crate::config::constants::*;`.

/// Length of the trailing activity window, in days.
pub const WINDOW_DAYS: i64 = 7;

/// Repository reported on when `GH_REPOS` is unset or empty.
pub const DEFAULT_GITHUB_REPO: &str = "callinofficial/studio-web";

/// GitHub REST API base (override with `GH_API_URL` for GitHub Enterprise).
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// OpenAI API base (override with `OPENAI_BASE_URL`).
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat-completion model used when `OPENAI_MODEL` is unset.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// User agent sent on every request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("weekly-digest/", env!("CARGO_PKG_VERSION"));
