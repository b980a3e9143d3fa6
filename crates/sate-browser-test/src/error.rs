//! Error types for browser automation.
//!
//! Failures are split by where they happen: launching Chrome, talking CDP,
//! loading a page, locating an element, waiting for a condition, or handling a
//! JavaScript dialog. Each variant carries the selector, URL, or condition
//! that was involved so a failing scenario can be diagnosed from its log line.

use std::time::Duration;
use thiserror::Error;

/// The error type for every operation in this crate.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// Usually Chrome/Chromium is missing or not executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to talk to the browser over the DevTools connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// No element matched the selector.
    #[error("no element matches '{selector}'")]
    ElementNotFound {
        /// CSS selector that was queried
        selector: String,
    },

    /// An element was found but the requested interaction failed.
    #[error("interaction '{action}' on '{selector}' failed: {reason}")]
    InteractionFailed {
        /// What was attempted (click, type, read text, ...)
        action: &'static str,
        /// Selector the element was located with
        selector: String,
        /// Reason reported by the browser
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// Accepting or dismissing a JavaScript dialog failed for a reason other
    /// than the dialog not being there.
    #[error("dialog handling failed: {0}")]
    DialogFailed(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Returns true for errors that mean "the thing is not there (yet)".
    ///
    /// Polling waits keep going on these and give up on everything else.
    #[must_use]
    pub fn is_absence(&self) -> bool {
        matches!(self, BrowserError::ElementNotFound { .. })
    }
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
