//! Element handles and the reads/interactions tests perform on them.
//!
//! An `Element` remembers the selector it was located with, so every error it
//! returns names the DOM node involved.

use crate::error::{BrowserError, Result};
use chromiumoxide::element::Element as ChromeElement;
use serde_json::Value;

/// Visibility check equivalent to WebDriver's "is displayed": attached,
/// not `display: none` / `visibility: hidden`, and laid out with a box.
const IS_DISPLAYED_FN: &str = r"function() {
    if (!this.isConnected) { return false; }
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') { return false; }
    return this.getClientRects().length > 0;
}";

/// A located DOM element.
#[derive(Debug)]
pub struct Element {
    inner: ChromeElement,
    selector: String,
}

impl Element {
    pub(crate) fn new(inner: ChromeElement, selector: impl Into<String>) -> Self {
        Self {
            inner,
            selector: selector.into(),
        }
    }

    /// Selector this element was located with.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    fn failed(&self, action: &'static str, err: impl ToString) -> BrowserError {
        BrowserError::InteractionFailed {
            action,
            selector: self.selector.clone(),
            reason: err.to_string(),
        }
    }

    /// Scrolls the element into view and clicks its centre.
    ///
    /// # Errors
    ///
    /// Fails if the element has no clickable box.
    pub async fn click(&self) -> Result<()> {
        self.inner
            .click()
            .await
            .map_err(|e| self.failed("click", e))?;
        Ok(())
    }

    /// Focuses the element and types `text` key by key.
    ///
    /// # Errors
    ///
    /// Fails if the element cannot take focus.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        self.inner
            .focus()
            .await
            .map_err(|e| self.failed("focus", e))?;
        self.inner
            .type_str(text)
            .await
            .map_err(|e| self.failed("type", e))?;
        Ok(())
    }

    /// Rendered text (`innerText`), trimmed. Empty if the node has none.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be queried.
    pub async fn text(&self) -> Result<String> {
        let text = self
            .inner
            .inner_text()
            .await
            .map_err(|e| self.failed("read text", e))?;
        Ok(text.map(|t| t.trim().to_string()).unwrap_or_default())
    }

    /// Value of an HTML attribute, `None` when absent.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be queried.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.inner
            .attribute(name)
            .await
            .map_err(|e| self.failed("read attribute", e))
    }

    /// Whether the `class` attribute contains `token` as a whole word.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be queried.
    pub async fn has_class(&self, token: &str) -> Result<bool> {
        let classes = self.attribute("class").await?;
        Ok(class_list_contains(classes.as_deref().unwrap_or(""), token))
    }

    async fn bool_property(&self, name: &str, action: &'static str) -> Result<bool> {
        let value = self
            .inner
            .property(name)
            .await
            .map_err(|e| self.failed(action, e))?;
        Ok(matches!(value, Some(Value::Bool(true))))
    }

    /// Checked state of a radio button or checkbox.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be queried.
    pub async fn is_selected(&self) -> Result<bool> {
        self.bool_property("checked", "read checked state").await
    }

    /// False when the control carries the `disabled` property.
    ///
    /// # Errors
    ///
    /// Fails if the page cannot be queried.
    pub async fn is_enabled(&self) -> Result<bool> {
        Ok(!self.bool_property("disabled", "read disabled state").await?)
    }

    /// Whether the element is rendered on screen.
    ///
    /// # Errors
    ///
    /// Fails if the visibility script cannot run.
    pub async fn is_displayed(&self) -> Result<bool> {
        let returns = self
            .inner
            .call_js_fn(IS_DISPLAYED_FN, false)
            .await
            .map_err(|e| self.failed("check visibility", e))?;
        Ok(matches!(returns.result.value, Some(Value::Bool(true))))
    }
}

/// Whitespace-separated class list membership, as `classList.contains` does it.
#[must_use]
pub fn class_list_contains(class_attr: &str, token: &str) -> bool {
    class_attr.split_ascii_whitespace().any(|c| c == token)
}
