//! Browser process lifecycle.
//!
//! `TestBrowser` launches Chrome, drives the CDP handler, and opens pages.
//! Callers are expected to `close()` it explicitly; Drop only exists as a
//! backstop so a panicking test never leaks a Chrome process.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Configuration for launching a test browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<PathBuf>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window, for watching a run locally.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome executable instead of auto-detection.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Chrome arguments derived from this config, in launch order, with
    /// `profile_dir` as Chrome's `--user-data-dir`.
    #[must_use]
    pub fn launch_args(&self, profile_dir: &Path) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 3);

        if self.headless {
            args.push("--headless".to_string());
        }

        args.push(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        args.push(format!("--user-data-dir={}", profile_dir.display()));

        args.extend(self.args.iter().cloned());
        args
    }

    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        // chromiumoxide launches headful unless told otherwise; our own
        // --headless flag comes from launch_args.
        config = config.with_head();

        for arg in self.launch_args(profile_dir) {
            config = config.arg(arg);
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable (containers, CI).
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
                // file:// targets must be able to run their inline scripts.
                "--allow-file-access-from-files".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed browser instance.
///
/// # Example
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("file:///srv/sate/index.html", WaitConfig::default()).await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    handler: JoinHandle<()>,
    /// Fresh per launch so back-to-back sessions never contend for Chrome's
    /// profile lock. Removed when the browser is dropped.
    profile: TempDir,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        let profile = tempfile::Builder::new()
            .prefix("sate-browser-test-")
            .tempdir()
            .map_err(|e| BrowserError::LaunchFailed {
                reason: "failed to create a Chrome profile directory".to_string(),
                source: Some(Box::new(e)),
            })?;
        let browser_config = config.to_browser_config(profile.path())?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only makes progress while its handler is polled.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            handler,
            profile,
        })
    }

    /// Chrome's `--user-data-dir` for this browser.
    #[must_use]
    pub fn profile_dir(&self) -> &Path {
        self.profile.path()
    }

    /// Opens a new blank page (tab) with its own console and dialog capture.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;

        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page))
    }

    /// Closes the browser, waits for the Chrome process to exit, and removes
    /// its profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(self) -> Result<()> {
        let mut browser_guard = self.inner.lock().await;

        if let Some(mut browser) = browser_guard.take() {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
            if let Err(e) = browser.wait().await {
                warn!("Chrome process did not exit cleanly: {}", e);
            }
        }

        self.handler.abort();
        Ok(())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // close() takes the Browser out; if it is still here we were dropped
        // without it and chromiumoxide's own Drop kills the process.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("TestBrowser dropped without explicit close() - forcing shutdown via Drop");
            }
        }
        self.handler.abort();
    }
}
