// Logging setup
//
// Logs go to stderr so stdout carries only the generated summary.
// RUST_LOG overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Default filter for normal runs
pub const DEFAULT_FILTER: &str = "weekly_digest=info";

/// Default filter with `--verbose`
pub const VERBOSE_FILTER: &str = "weekly_digest=debug";

/// Pick the filter directive used when RUST_LOG is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global tracing subscriber. Call once, at startup.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
