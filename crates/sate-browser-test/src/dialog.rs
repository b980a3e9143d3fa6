//! Native JavaScript dialog handling.
//!
//! `alert()`, `confirm()` and `prompt()` block the page's event loop, and a
//! CDP click that opens one does not complete until the dialog is answered.
//! Dialogs therefore have to be answered from a listener that runs
//! independently of the code that triggered them. Each `Page` owns one such
//! listener; it consults the current [`DialogPolicy`] and records what it did
//! in a [`DialogCapture`].

use crate::error::{BrowserError, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Chrome's reply when asked to handle a dialog that is not open.
const NO_DIALOG_SHOWING: &str = "No dialog is showing";

/// What the page listener does when a dialog opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogPolicy {
    /// Leave the dialog open. Anything blocked on it stays blocked.
    #[default]
    Ignore,
    /// Press OK.
    Accept,
    /// Press Cancel.
    Dismiss,
}

impl DialogPolicy {
    /// The `accept` flag to send to `Page.handleJavaScriptDialog`, if any.
    #[must_use]
    pub fn accept_flag(self) -> Option<bool> {
        match self {
            DialogPolicy::Ignore => None,
            DialogPolicy::Accept => Some(true),
            DialogPolicy::Dismiss => Some(false),
        }
    }
}

/// How a single dialog was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogOutcome {
    /// OK was pressed.
    Accepted,
    /// Cancel was pressed.
    Dismissed,
    /// The policy was `Ignore`.
    Left,
    /// The dialog was gone by the time we answered it.
    NotShowing,
    /// Answering failed for any other reason.
    Failed(String),
}

impl DialogOutcome {
    /// Classifies the result of a `Page.handleJavaScriptDialog` call.
    ///
    /// A "no dialog is showing" reply is not a failure: the dialog is simply
    /// absent, which callers that answer dialogs opportunistically expect.
    #[must_use]
    pub fn from_reply(accept: bool, reply: std::result::Result<(), String>) -> Self {
        match reply {
            Ok(()) if accept => DialogOutcome::Accepted,
            Ok(()) => DialogOutcome::Dismissed,
            Err(msg) if msg.contains(NO_DIALOG_SHOWING) => DialogOutcome::NotShowing,
            Err(msg) => DialogOutcome::Failed(msg),
        }
    }
}

/// One dialog observed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogRecord {
    /// `alert`, `confirm`, `prompt` or `beforeunload`.
    pub kind: String,
    /// Text shown in the dialog.
    pub message: String,
    /// What the listener did with it.
    pub outcome: DialogOutcome,
}

/// Shared policy and history for a page's dialogs.
///
/// Cloning is cheap; the listener task and the `Page` hold the same state.
#[derive(Debug, Clone, Default)]
pub struct DialogCapture {
    policy: Arc<Mutex<DialogPolicy>>,
    records: Arc<Mutex<Vec<DialogRecord>>>,
}

impl DialogCapture {
    /// Creates an empty capture with the `Ignore` policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current policy.
    #[must_use]
    pub fn policy(&self) -> DialogPolicy {
        *self.policy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the policy for dialogs opened from now on.
    pub fn set_policy(&self, policy: DialogPolicy) {
        *self.policy.lock().unwrap_or_else(PoisonError::into_inner) = policy;
    }

    /// Appends a record. The page listener calls this for every dialog it
    /// sees.
    pub fn push(&self, record: DialogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// All dialogs seen so far, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<DialogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent dialog, if any opened.
    #[must_use]
    pub fn last(&self) -> Option<DialogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Fails if any dialog could not be answered.
    ///
    /// Absent dialogs and `NotShowing` replies are fine.
    ///
    /// # Errors
    ///
    /// Returns `DialogFailed` with the first recorded failure.
    pub fn ensure_no_failures(&self) -> Result<()> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        for record in records.iter() {
            if let DialogOutcome::Failed(reason) = &record.outcome {
                return Err(BrowserError::DialogFailed(format!(
                    "{} \"{}\": {}",
                    record.kind, record.message, reason
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: DialogOutcome) -> DialogRecord {
        DialogRecord {
            kind: "confirm".into(),
            message: "Deseja finalizar a prova?".into(),
            outcome,
        }
    }

    #[test]
    fn policy_maps_to_accept_flag() {
        assert_eq!(DialogPolicy::Ignore.accept_flag(), None);
        assert_eq!(DialogPolicy::Accept.accept_flag(), Some(true));
        assert_eq!(DialogPolicy::Dismiss.accept_flag(), Some(false));
    }

    #[test]
    fn missing_dialog_is_not_a_failure() {
        let outcome = DialogOutcome::from_reply(
            true,
            Err("Error -32602: No dialog is showing".to_string()),
        );
        assert_eq!(outcome, DialogOutcome::NotShowing);
    }

    #[test]
    fn other_reply_errors_are_failures() {
        let outcome = DialogOutcome::from_reply(true, Err("Target closed".to_string()));
        assert_eq!(outcome, DialogOutcome::Failed("Target closed".into()));
        assert_eq!(
            DialogOutcome::from_reply(false, Ok(())),
            DialogOutcome::Dismissed
        );
    }

    #[test]
    fn capture_reports_first_failure() {
        let capture = DialogCapture::new();
        capture.push(record(DialogOutcome::NotShowing));
        assert!(capture.ensure_no_failures().is_ok());

        capture.push(record(DialogOutcome::Failed("Target closed".into())));
        let err = capture.ensure_no_failures().unwrap_err();
        assert!(err.to_string().contains("Target closed"));
        assert_eq!(capture.records().len(), 2);
    }

    #[test]
    fn policy_is_shared_between_clones() {
        let capture = DialogCapture::new();
        let listener_side = capture.clone();
        capture.set_policy(DialogPolicy::Accept);
        assert_eq!(listener_side.policy(), DialogPolicy::Accept);
        assert!(listener_side.last().is_none());
    }
}
