//! Page-level browser operations.
//!
//! A `Page` is one browser tab. Besides navigation and element lookup it runs
//! two background listeners for its lifetime: one collecting console output,
//! one answering JavaScript dialogs according to the page's dialog policy.

use crate::console::{parse_console_event, ConsoleCapture};
use crate::dialog::{DialogCapture, DialogOutcome, DialogPolicy, DialogRecord};
use crate::element::Element;
use crate::error::{BrowserError, Result};
use crate::wait::{settle, wait_for_result, Settled, WaitConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A browser tab with element lookup, waiting, and console/dialog capture.
#[derive(Debug)]
pub struct Page {
    inner: Arc<ChromePage>,
    console: ConsoleCapture,
    dialogs: DialogCapture,
    listeners: Vec<JoinHandle<()>>,
}

impl Page {
    pub(crate) fn new(page: ChromePage) -> Self {
        let inner = Arc::new(page);
        let console = ConsoleCapture::new();
        let dialogs = DialogCapture::new();

        let listeners = vec![
            spawn_console_listener(inner.clone(), console.clone()),
            spawn_dialog_listener(inner.clone(), dialogs.clone()),
        ];

        Self {
            inner,
            console,
            dialogs,
            listeners,
        }
    }

    /// Console messages logged by the page.
    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    /// Dialogs opened by the page and how they were answered.
    #[must_use]
    pub fn dialogs(&self) -> &DialogCapture {
        &self.dialogs
    }

    /// Sets how dialogs opened from now on are answered.
    pub fn set_dialog_policy(&self, policy: DialogPolicy) {
        debug!("Dialog policy set to {:?}", policy);
        self.dialogs.set_policy(policy);
    }

    /// Navigates to an absolute URL and waits, bounded by `config`, for
    /// `document.readyState` to reach `complete`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`
    /// if it does not finish loading within `config.timeout`.
    pub async fn navigate(&self, url: &str, config: WaitConfig) -> Result<()> {
        debug!("Navigating to {}", url);
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(config).await
    }

    /// Waits for `document.readyState == "complete"`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never completes.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || async {
                let state: String = self.evaluate("document.readyState").await?;
                Ok(state == "complete")
            },
            config,
            "document ready",
        )
        .await
    }

    /// Runs a JavaScript expression and deserializes its value.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the script throws or the value does
    /// not deserialize into `T`.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Every element matching a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Fails if the DOM cannot be queried. No match is an empty list.
    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        let elements = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| BrowserError::InteractionFailed {
                action: "query",
                selector: selector.to_string(),
                reason: e.to_string(),
            })?;

        Ok(elements
            .into_iter()
            .map(|e| Element::new(e, selector))
            .collect())
    }

    /// The first element matching a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if nothing matches.
    pub async fn find(&self, selector: &str) -> Result<Element> {
        self.find_all(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })
    }

    /// The element with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has that id.
    pub async fn find_by_id(&self, id: &str) -> Result<Element> {
        self.find(&id_selector(id)).await
    }

    /// Waits for a CSS selector to match at least one element.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if nothing matches in time.
    pub async fn wait_for_selector(&self, selector: &str, config: WaitConfig) -> Result<Element> {
        match settle(|| self.find(selector), |_| true, config).await? {
            Settled::Matched(element) => Ok(element),
            Settled::TimedOut { .. } => Err(BrowserError::WaitTimeout {
                condition: format!("selector '{selector}'"),
                timeout: config.timeout,
            }),
        }
    }

    /// Polls `probe` until `accept` holds for its value.
    ///
    /// Thin wrapper over [`settle`] so callers can probe through `&Page`.
    ///
    /// # Errors
    ///
    /// Propagates non-absence probe errors.
    pub async fn wait_until<'a, T, F, Fut, P>(
        &'a self,
        probe: F,
        accept: P,
        config: WaitConfig,
    ) -> Result<Settled<T>>
    where
        F: Fn(&'a Page) -> Fut,
        Fut: Future<Output = Result<T>> + 'a,
        P: Fn(&T) -> bool,
    {
        settle(|| probe(self), accept, config).await
    }

    /// Current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Document title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Stops the listeners and closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome refuses to close the target.
    pub async fn close(self) -> Result<()> {
        for listener in &self.listeners {
            listener.abort();
        }
        // An aborted task only drops its Arc<ChromePage> once it has been
        // observed as finished.
        for listener in self.listeners {
            let _ = listener.await;
        }

        match Arc::try_unwrap(self.inner) {
            Ok(page) => page.close().await.map_err(BrowserError::ChromiumOxide),
            Err(_) => {
                warn!("Page still shared after listeners stopped - leaving it to the browser");
                Ok(())
            }
        }
    }
}

/// CSS selector for an element id, escaping anything outside `[A-Za-z0-9_-]`.
#[must_use]
pub fn id_selector(id: &str) -> String {
    let mut selector = String::with_capacity(id.len() + 1);
    selector.push('#');
    for (i, c) in id.chars().enumerate() {
        let leading_digit = i == 0 && c.is_ascii_digit();
        if leading_digit {
            selector.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            selector.push(c);
        } else {
            selector.push('\\');
            selector.push(c);
        }
    }
    selector
}

fn spawn_console_listener(page: Arc<ChromePage>, console: ConsoleCapture) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Ok(mut events) = page.event_listener::<EventConsoleApiCalled>().await {
            while let Some(event) = events.next().await {
                console.push(parse_console_event(&event));
            }
        }
    })
}

fn spawn_dialog_listener(page: Arc<ChromePage>, dialogs: DialogCapture) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut events = match page.event_listener::<EventJavascriptDialogOpening>().await {
            Ok(events) => events,
            Err(e) => {
                warn!("Could not subscribe to dialog events: {}", e);
                return;
            }
        };

        while let Some(event) = events.next().await {
            let kind = format!("{:?}", event.r#type).to_lowercase();
            let outcome = match dialogs.policy().accept_flag() {
                None => DialogOutcome::Left,
                Some(accept) => {
                    let reply = page
                        .execute(HandleJavaScriptDialogParams::new(accept))
                        .await
                        .map(|_| ())
                        .map_err(|e| e.to_string());
                    DialogOutcome::from_reply(accept, reply)
                }
            };
            debug!("{} dialog \"{}\" -> {:?}", kind, event.message, outcome);
            dialogs.push(DialogRecord {
                kind,
                message: event.message.clone(),
                outcome,
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_are_untouched() {
        assert_eq!(id_selector("loginScreen"), "#loginScreen");
        assert_eq!(id_selector("blankResultCount"), "#blankResultCount");
        assert_eq!(id_selector("question-10"), "#question-10");
    }

    #[test]
    fn special_characters_are_escaped() {
        assert_eq!(id_selector("a.b"), "#a\\.b");
        assert_eq!(id_selector("q:1"), "#q\\:1");
        assert_eq!(id_selector("1st"), "#\\31 st");
    }
}
