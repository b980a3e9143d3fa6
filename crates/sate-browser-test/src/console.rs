//! Page console capture.
//!
//! The exam page reports its own script failures through `console.error`.
//! Capturing them lets a failing scenario show the page-side cause next to the
//! assertion that tripped.

use chromiumoxide::cdp::js_protocol::runtime::{ConsoleApiCalledType, EventConsoleApiCalled};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()`
    Error,
    /// `console.debug()`
    Debug,
    /// Anything else (`table`, `trace`, `assert`, ...)
    Other,
}

impl ConsoleLevel {
    /// Returns true for `console.error()`.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }
}

impl From<&ConsoleApiCalledType> for ConsoleLevel {
    fn from(kind: &ConsoleApiCalledType) -> Self {
        match kind {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// A captured console message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity
    pub level: ConsoleLevel,
    /// Arguments joined with spaces; non-string arguments render as `<object>`
    pub text: String,
    /// `url:line:column` of the call site, when Chrome reports one
    pub source: Option<String>,
}

impl ConsoleMessage {
    /// Creates a message without a source location.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            source: None,
        }
    }
}

/// Console messages accumulated for one page, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates an empty capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, message: ConsoleMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }

    /// Snapshot of every message so far.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of `console.error()` messages.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|m| m.level.is_error())
            .cloned()
            .collect()
    }

    /// Number of messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let text = event
        .args
        .iter()
        .map(|arg| match arg.value.as_ref() {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) if !other.is_object() && !other.is_array() => other.to_string(),
            _ => "<object>".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");

    let source = event
        .stack_trace
        .as_ref()
        .and_then(|trace| trace.call_frames.first())
        .map(|frame| format!("{}:{}:{}", frame.url, frame.line_number, frame.column_number));

    ConsoleMessage {
        level: ConsoleLevel::from(&event.r#type),
        text,
        source,
    }
}
