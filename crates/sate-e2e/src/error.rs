//! Error types for the suite.
//!
//! Two layers:
//! - [`ScenarioError`]: why one scenario failed. Caught at the scenario
//!   boundary and only ever logged.
//! - [`CliError`] / [`ConfigError`]: why the process itself could not run
//!   (bad configuration, unusable target) or, under the strict exit policy,
//!   why it reports failure. Rendered through miette in `main`.

use sate_browser_test::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The page was reachable but showed the wrong thing.
    #[error("{message} (expected {expected}, got {actual})")]
    Assertion {
        /// What was being checked
        message: String,
        /// Expected observation
        expected: String,
        /// Actual observation
        actual: String,
    },

    /// The browser layer failed: missing element, timeout, crash.
    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// The scenario body panicked.
    #[error("scenario panicked: {0}")]
    Panicked(String),
}

impl ScenarioError {
    /// Builds an assertion failure.
    pub fn assertion(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ScenarioError::Assertion {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result alias for scenario bodies.
pub type ScenarioResult<T = ()> = std::result::Result<T, ScenarioError>;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Chrome could not be started at all
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Scenarios failed and the exit policy turns that into a failing exit
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed {
        /// Number of failed scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create sate.config.json or drop --config", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// The layered configuration did not deserialize
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Result alias for process-level operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Converts a `CliError` into a miette report for display in `main`.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Browser(BrowserError::LaunchFailed { reason, .. }) => miette::miette!(
            "Could not start Chrome: {}\n\nHint: Install Chrome/Chromium or pass --chrome-path",
            reason
        ),
        CliError::ScenariosFailed { failed, total } => miette::miette!(
            "{} of {} scenarios failed\n\nHint: Scroll up for the failing assertions, or use --exit-policy always-success",
            failed,
            total
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_message_shows_both_sides() {
        let err = ScenarioError::assertion("answered counter", "\"1\"", "\"0\"");
        assert_eq!(
            err.to_string(),
            "answered counter (expected \"1\", got \"0\")"
        );
    }

    #[test]
    fn browser_errors_pass_through_unchanged() {
        let err: ScenarioError = BrowserError::ElementNotFound {
            selector: "#finishBtn".into(),
        }
        .into();
        assert_eq!(err.to_string(), "no element matches '#finishBtn'");
    }

    #[test]
    fn missing_target_has_hint() {
        let err = CliError::from(ConfigError::MissingField {
            field: "target".into(),
            hint: "Pass --target".into(),
        });
        let msg = err.to_string();
        assert!(msg.contains("Missing required field: target"));
        assert!(msg.contains("Hint: Pass --target"));
    }

    #[test]
    fn failed_run_report_mentions_counts() {
        let report = cli_error_to_miette(CliError::ScenariosFailed {
            failed: 2,
            total: 8,
        });
        assert!(report.to_string().starts_with("2 of 8 scenarios failed"));
    }
}
