// Error types and user-facing error formatting

use thiserror::Error;

/// Problems found while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// A variable is set but its value cannot be used.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Append a suggestion block to an error message
pub fn wrap_error_with_suggestion(error: impl std::fmt::Display, suggestion: &str) -> String {
    format!("{}\n\n{}", error, suggestion)
}

/// User-facing message for a configuration error, with a hint for missing variables
pub fn config_error_message(err: &ConfigError) -> String {
    match err {
        ConfigError::MissingVar(var) => wrap_error_with_suggestion(
            err,
            &format!("Set it before running:\n  export {}=\"...\"", var),
        ),
        ConfigError::InvalidValue { .. } => err.to_string(),
    }
}
