//! Session lifecycle.
//!
//! Every scenario gets a brand-new browser and gives it back when it is done,
//! however it finishes. [`run_scenario`] is the only place that opens and
//! closes sessions, so the "one open, one close" rule lives in one function.
//!
//! The [`Launcher`] trait separates that rule from Chrome: the runner and its
//! tests work the same against a launcher that hands out fake sessions.

use crate::error::{ScenarioError, ScenarioResult};
use crate::ui;
use async_trait::async_trait;
use futures::FutureExt;
use sate_browser_test::{BrowserError, Page, TestBrowser, TestBrowserConfig, WaitConfig};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Opens and closes sessions of some kind.
#[async_trait]
pub trait Launcher: Send + Sync {
    /// What a scenario receives.
    type Session: Send + Sync;

    /// Starts a fresh session.
    async fn open(&self) -> Result<Self::Session, BrowserError>;

    /// Releases a session. Called exactly once per successful `open`.
    async fn close(&self, session: Self::Session) -> Result<(), BrowserError>;
}

/// One test procedure.
#[async_trait]
pub trait Scenario<S: Sync>: Send + Sync {
    /// Stable identifier used by `--only`.
    fn slug(&self) -> &'static str;

    /// Human-readable name.
    fn title(&self) -> &'static str;

    /// Runs the procedure against an open session.
    async fn run(&self, session: &S) -> ScenarioResult;
}

/// How a scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every check held
    Passed,
    /// The first failing check, or the error that stopped the scenario
    Failed {
        /// Rendered error
        message: String,
    },
}

/// Outcome of one scenario plus how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Scenario slug
    pub slug: &'static str,
    /// Scenario title
    pub title: &'static str,
    /// Pass or fail
    pub outcome: Outcome,
    /// Wall-clock time including browser start-up and shutdown
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// Returns true if the scenario passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Settings every scenario needs besides the page itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Resolved exam page URL
    pub target_url: String,
    /// Bound and period for every wait
    pub wait: WaitConfig,
    /// How long to watch the countdown timer for a change
    pub timer_window: Duration,
    /// How long "stays on screen" checks keep watching
    pub hold_window: Duration,
}

/// A live Chrome instance with one open tab.
pub struct BrowserSession {
    browser: TestBrowser,
    page: Page,
    settings: SessionSettings,
}

impl BrowserSession {
    /// The tab scenarios drive.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Run-wide settings.
    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }
}

/// Launches one headless Chrome per session.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    browser: TestBrowserConfig,
    settings: SessionSettings,
}

impl ChromeLauncher {
    /// Creates a launcher with fixed browser options and settings.
    #[must_use]
    pub fn new(browser: TestBrowserConfig, settings: SessionSettings) -> Self {
        Self { browser, settings }
    }
}

#[async_trait]
impl Launcher for ChromeLauncher {
    type Session = BrowserSession;

    async fn open(&self) -> Result<BrowserSession, BrowserError> {
        let browser = TestBrowser::launch(self.browser.clone()).await?;
        let page = match browser.new_page().await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Closing browser after failed page creation: {}", close_err);
                }
                return Err(e);
            }
        };

        Ok(BrowserSession {
            browser,
            page,
            settings: self.settings.clone(),
        })
    }

    async fn close(&self, session: BrowserSession) -> Result<(), BrowserError> {
        let BrowserSession { browser, page, .. } = session;

        if let Ok(url) = page.url().await {
            debug!("Closing session at {}", url);
        }

        for message in page.console().errors() {
            warn!(
                source = message.source.as_deref().unwrap_or("?"),
                "Page console error: {}", message.text
            );
        }

        if let Err(e) = page.close().await {
            warn!("Closing page: {}", e);
        }
        browser.close().await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Opens a session, runs `scenario` in it, and closes it again.
///
/// Never fails: launch errors, assertion failures, browser errors and panics
/// all become a `Failed` report. A session that was opened is always closed;
/// a failure to close is logged and does not change the outcome.
pub async fn run_scenario<L>(
    launcher: &L,
    index: usize,
    scenario: &dyn Scenario<L::Session>,
) -> ScenarioReport
where
    L: Launcher,
{
    let title = scenario.title();
    ui::scenario_header(index, title);
    let start = Instant::now();

    let result = match launcher.open().await {
        Ok(session) => {
            debug!(scenario = scenario.slug(), "Session opened");
            let result = AssertUnwindSafe(scenario.run(&session))
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(ScenarioError::Panicked(panic_message(&*payload))));

            if let Err(e) = launcher.close(session).await {
                warn!(scenario = scenario.slug(), "Failed to close session: {}", e);
                ui::warning(&format!("Browser did not close cleanly: {e}"));
            }
            debug!(scenario = scenario.slug(), "Session closed");
            result
        }
        Err(e) => Err(ScenarioError::Browser(e)),
    };

    let elapsed = start.elapsed();
    let outcome = match result {
        Ok(()) => {
            ui::scenario_passed(title);
            info!(scenario = scenario.slug(), elapsed_ms = elapsed.as_millis() as u64, "passed");
            Outcome::Passed
        }
        Err(e) => {
            let message = e.to_string();
            ui::scenario_failed(title, &message);
            error!(scenario = scenario.slug(), elapsed_ms = elapsed.as_millis() as u64, "failed: {}", message);
            Outcome::Failed { message }
        }
    };

    ScenarioReport {
        slug: scenario.slug(),
        title,
        outcome,
        elapsed,
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CountingLauncher, Scripted};
    use super::*;

    #[tokio::test]
    async fn passing_scenario_opens_and_closes_once() {
        let launcher = CountingLauncher::default();
        let report = run_scenario(&launcher, 1, &Scripted::Pass("login")).await;

        assert!(report.passed());
        assert_eq!(report.slug, "login");
        assert_eq!((launcher.opened(), launcher.closed()), (1, 1));
    }

    #[tokio::test]
    async fn failures_still_close_the_session() {
        for scenario in [
            Scripted::Assert("finish-exam"),
            Scripted::Timeout("login"),
            Scripted::Panic("question-grid"),
        ] {
            let launcher = CountingLauncher::default();
            let report = run_scenario(&launcher, 1, &scenario).await;

            assert!(!report.passed(), "{} should fail", scenario.slug());
            assert_eq!((launcher.opened(), launcher.closed()), (1, 1));
        }
    }

    #[tokio::test]
    async fn failure_messages_are_kept() {
        let launcher = CountingLauncher::default();

        let report = run_scenario(&launcher, 1, &Scripted::Assert("finish-exam")).await;
        assert_eq!(
            report.outcome,
            Outcome::Failed {
                message: "score (expected 3, got 2)".into()
            }
        );

        let report = run_scenario(&launcher, 2, &Scripted::Panic("question-grid")).await;
        assert_eq!(
            report.outcome,
            Outcome::Failed {
                message: "scenario panicked: grid index out of range".into()
            }
        );
    }

    #[tokio::test]
    async fn launch_failure_fails_without_close() {
        let launcher = CountingLauncher {
            fail_open: true,
            ..CountingLauncher::default()
        };
        let report = run_scenario(&launcher, 1, &Scripted::Pass("timer")).await;

        assert!(!report.passed());
        assert_eq!(launcher.closed(), 0);
    }

    #[tokio::test]
    async fn close_failure_does_not_change_outcome() {
        let launcher = CountingLauncher {
            fail_close: true,
            ..CountingLauncher::default()
        };
        let report = run_scenario(&launcher, 1, &Scripted::Pass("timer")).await;

        assert!(report.passed());
        assert_eq!(launcher.closed(), 1);
    }
}
