//! Page object for the exam page.
//!
//! Scenarios never touch selectors directly: they go through [`ExamPage`],
//! and every identifier the page is expected to expose lives in [`dom`].
//!
//! Every `expect_*` method polls until the page shows the expected state or
//! the session's wait timeout elapses, so a scenario never sleeps blindly
//! after a click. On timeout the failure names the last value observed.

use crate::error::{ScenarioError, ScenarioResult};
use crate::session::{BrowserSession, SessionSettings};
use sate_browser_test::{
    id_selector, settle, DialogCapture, DialogPolicy, Page, Settled, WaitConfig,
};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Identifiers and class tokens of the exam page.
pub mod dom {
    /// Login view container
    pub const LOGIN_SCREEN: &str = "loginScreen";
    /// Student name input
    pub const STUDENT_NAME: &str = "studentName";
    /// Start button (selected by class)
    pub const LOGIN_BUTTON: &str = ".login-btn";
    /// Exam view container
    pub const EXAM_SCREEN: &str = "examScreen";
    /// Header line with the student's name
    pub const STUDENT_INFO: &str = "studentInfo";
    /// One-based index of the shown question
    pub const CURRENT_QUESTION: &str = "currentQuestionNumber";
    /// Answered counter
    pub const ANSWERED_COUNT: &str = "answeredCount";
    pub const NEXT_BUTTON: &str = "nextBtn";
    pub const PREV_BUTTON: &str = "prevBtn";
    pub const CLEAR_BUTTON: &str = "clearAnswerBtn";
    /// Countdown display
    pub const TIMER: &str = "timer";
    pub const FINISH_BUTTON: &str = "finishBtn";
    /// Grid controls, one per question (selected by class)
    pub const GRID_BUTTON: &str = ".question-number";
    /// Number of questions, and of grid controls
    pub const GRID_SIZE: usize = 40;

    /// Results view container
    pub const RESULTS_SCREEN: &str = "resultsScreen";
    pub const FINAL_SCORE: &str = "finalScore";
    pub const TOTAL_QUESTIONS: &str = "totalQuestions";
    pub const SCORE_PERCENTAGE: &str = "scorePercentage";
    pub const FINAL_STUDENT_NAME: &str = "finalStudentName";
    pub const CORRECT_COUNT: &str = "correctCount";
    pub const INCORRECT_COUNT: &str = "incorrectCount";
    pub const BLANK_COUNT: &str = "blankResultCount";

    /// Class token of a grid control whose question has a selection
    pub const ANSWERED: &str = "answered";
    /// Class token of the grid control for the shown question
    pub const ACTIVE: &str = "active";

    pub const OPTION_A: &str = "optiona";
    pub const OPTION_B: &str = "optionb";
    pub const OPTION_C: &str = "optionc";
    pub const OPTION_D: &str = "optiond";
    pub const OPTION_E: &str = "optione";

    /// Radio button id for option `letter` (`a` to `e`, either case).
    #[must_use]
    pub fn option(letter: char) -> Option<&'static str> {
        match letter.to_ascii_lowercase() {
            'a' => Some(OPTION_A),
            'b' => Some(OPTION_B),
            'c' => Some(OPTION_C),
            'd' => Some(OPTION_D),
            'e' => Some(OPTION_E),
            _ => None,
        }
    }
}

async fn text_of(page: &Page, id: &str) -> sate_browser_test::Result<String> {
    page.find_by_id(id).await?.text().await
}

async fn displayed(page: &Page, id: &str) -> sate_browser_test::Result<bool> {
    page.find_by_id(id).await?.is_displayed().await
}

async fn enabled(page: &Page, id: &str) -> sate_browser_test::Result<bool> {
    page.find_by_id(id).await?.is_enabled().await
}

async fn selected(page: &Page, id: &str) -> sate_browser_test::Result<bool> {
    page.find_by_id(id).await?.is_selected().await
}

async fn grid_len(page: &Page) -> sate_browser_test::Result<usize> {
    Ok(page.find_all(dom::GRID_BUTTON).await?.len())
}

/// Class membership of grid control `index` (zero-based), or `None` if the
/// grid has fewer controls.
async fn grid_has_class(
    page: &Page,
    index: usize,
    token: &str,
) -> sate_browser_test::Result<Option<bool>> {
    match page.find_all(dom::GRID_BUTTON).await?.get(index) {
        Some(button) => Ok(Some(button.has_class(token).await?)),
        None => Ok(None),
    }
}

/// Fails the scenario if the page listener could not answer a dialog.
fn ensure_dialogs_answered(dialogs: &DialogCapture) -> ScenarioResult {
    dialogs.ensure_no_failures()?;
    Ok(())
}

fn observed<T: Debug>(last: Option<T>) -> String {
    match last {
        Some(value) => format!("{value:?}"),
        None => "nothing (element not found)".to_string(),
    }
}

fn class_expectation(token: &str, expected: bool) -> String {
    if expected {
        format!("{token:?} in the class list")
    } else {
        format!("no {token:?} in the class list")
    }
}

/// Polls `probe` until `accept` holds, turning a timeout into an assertion
/// failure that names the last value seen.
async fn poll<T, F, Fut, P>(
    what: &str,
    expected: &str,
    probe: F,
    accept: P,
    config: WaitConfig,
) -> ScenarioResult<T>
where
    T: Debug,
    F: Fn() -> Fut,
    Fut: Future<Output = sate_browser_test::Result<T>>,
    P: Fn(&T) -> bool,
{
    match settle(probe, accept, config).await? {
        Settled::Matched(value) => Ok(value),
        Settled::TimedOut { last } => Err(ScenarioError::assertion(what, expected, observed(last))),
    }
}

/// The exam page as seen through one session.
pub struct ExamPage<'a> {
    session: &'a BrowserSession,
}

impl<'a> ExamPage<'a> {
    /// Wraps an open session.
    #[must_use]
    pub fn new(session: &'a BrowserSession) -> Self {
        Self { session }
    }

    /// The underlying tab.
    #[must_use]
    pub fn page(&self) -> &'a Page {
        self.session.page()
    }

    fn settings(&self) -> &'a SessionSettings {
        self.session.settings()
    }

    fn wait(&self) -> WaitConfig {
        self.settings().wait
    }

    /// Loads the target and waits for the login view.
    ///
    /// # Errors
    ///
    /// Fails if navigation fails or the login view never shows.
    pub async fn open(&self) -> ScenarioResult {
        self.page()
            .navigate(&self.settings().target_url, self.wait())
            .await?;
        self.expect_displayed(dom::LOGIN_SCREEN).await
    }

    /// Types `name`, presses the start button, and waits for the exam view.
    ///
    /// # Errors
    ///
    /// Fails if any control is missing or the exam view never shows.
    pub async fn login(&self, name: &str) -> ScenarioResult {
        self.type_into(dom::STUDENT_NAME, name).await?;
        self.press_login().await?;
        self.expect_displayed(dom::EXAM_SCREEN).await
    }

    /// Presses the start button without waiting for anything.
    ///
    /// A page that rejects the input with `alert()` gets its dialog accepted.
    ///
    /// # Errors
    ///
    /// Fails if the button is missing or answering a dialog failed.
    pub async fn press_login(&self) -> ScenarioResult {
        self.page().set_dialog_policy(DialogPolicy::Accept);
        let button = self
            .page()
            .wait_for_selector(dom::LOGIN_BUTTON, self.wait())
            .await?;
        button.click().await?;
        self.ensure_dialogs_answered()
    }

    /// Fails if any dialog opened so far could not be answered.
    ///
    /// # Errors
    ///
    /// Returns the first recorded dialog failure.
    pub fn ensure_dialogs_answered(&self) -> ScenarioResult {
        ensure_dialogs_answered(self.page().dialogs())
    }

    /// Types into the input with the given id.
    ///
    /// # Errors
    ///
    /// Fails if the input never appears.
    pub async fn type_into(&self, id: &str, text: &str) -> ScenarioResult {
        let input = self
            .page()
            .wait_for_selector(&id_selector(id), self.wait())
            .await?;
        input.type_text(text).await?;
        Ok(())
    }

    /// Clicks the element with the given id.
    ///
    /// # Errors
    ///
    /// Fails if the element never appears.
    pub async fn click(&self, id: &str) -> ScenarioResult {
        let element = self
            .page()
            .wait_for_selector(&id_selector(id), self.wait())
            .await?;
        debug!("click {}", element.selector());
        element.click().await?;
        Ok(())
    }

    /// Selects option `letter` on the shown question.
    ///
    /// # Errors
    ///
    /// Fails for a letter outside `a`..`e` or a missing radio button.
    pub async fn choose(&self, letter: char) -> ScenarioResult {
        let id = dom::option(letter)
            .ok_or_else(|| ScenarioError::assertion("option letter", "a to e", letter.to_string()))?;
        self.click(id).await
    }

    /// Clicks grid control `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Fails if the grid never grows to `index + 1` controls.
    pub async fn click_grid(&self, index: usize) -> ScenarioResult {
        let page = self.page();
        let count = poll(
            "question grid size",
            &format!("more than {index}"),
            || grid_len(page),
            |len: &usize| *len > index,
            self.wait(),
        )
        .await?;
        debug!("click grid control {} of {}", index + 1, count);

        let buttons = page.find_all(dom::GRID_BUTTON).await?;
        match buttons.get(index) {
            Some(button) => Ok(button.click().await?),
            None => Err(ScenarioError::assertion(
                "question grid size",
                format!("more than {index}"),
                buttons.len().to_string(),
            )),
        }
    }

    /// Accepts the confirmation dialog if one opens, presses finish, and
    /// waits for the results view. Returns whether a dialog was answered.
    ///
    /// # Errors
    ///
    /// Fails if the results view never shows or answering a dialog failed.
    pub async fn finish(&self) -> ScenarioResult<bool> {
        let before = self.page().dialogs().records().len();
        self.page().set_dialog_policy(DialogPolicy::Accept);
        self.click(dom::FINISH_BUTTON).await?;
        self.expect_displayed(dom::RESULTS_SCREEN).await?;
        self.ensure_dialogs_answered()?;
        Ok(self.page().dialogs().records().len() > before)
    }

    /// Waits until the text of `id` equals `expected`.
    ///
    /// # Errors
    ///
    /// Fails with the last text seen if it never matches.
    pub async fn expect_text(&self, id: &str, expected: &str) -> ScenarioResult {
        let page = self.page();
        poll(
            &format!("text of #{id}"),
            &format!("{expected:?}"),
            || text_of(page, id),
            |text: &String| text == expected,
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Waits until the text of `id` contains `needle`, returning the text.
    ///
    /// # Errors
    ///
    /// Fails with the last text seen if it never matches.
    pub async fn expect_text_containing(&self, id: &str, needle: &str) -> ScenarioResult<String> {
        let page = self.page();
        poll(
            &format!("text of #{id}"),
            &format!("text containing {needle:?}"),
            || text_of(page, id),
            |text: &String| text.contains(needle),
            self.wait(),
        )
        .await
    }

    /// Waits until `id` is rendered.
    ///
    /// # Errors
    ///
    /// Fails if it stays hidden or missing.
    pub async fn expect_displayed(&self, id: &str) -> ScenarioResult {
        let page = self.page();
        poll(
            &format!("#{id} displayed"),
            "true",
            || displayed(page, id),
            |shown: &bool| *shown,
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Watches `id` for the hold window and fails if it is ever hidden.
    ///
    /// # Errors
    ///
    /// Fails as soon as the element is seen hidden or removed.
    pub async fn expect_stays_displayed(&self, id: &str) -> ScenarioResult {
        let page = self.page();
        let hold = WaitConfig::new(self.settings().hold_window, self.wait().poll_interval);
        // A missing element counts as hidden here, unlike in the other waits.
        let probe = || async move {
            match displayed(page, id).await {
                Err(e) if e.is_absence() => Ok(false),
                other => other,
            }
        };

        match settle(probe, |shown: &bool| !*shown, hold).await? {
            Settled::Matched(_) => Err(ScenarioError::assertion(
                format!("#{id} stays displayed"),
                "true",
                "false",
            )),
            Settled::TimedOut { .. } => Ok(()),
        }
    }

    /// Waits until the enabled state of `id` equals `expected`.
    ///
    /// # Errors
    ///
    /// Fails if the state never matches.
    pub async fn expect_enabled(&self, id: &str, expected: bool) -> ScenarioResult {
        let page = self.page();
        poll(
            &format!("#{id} enabled"),
            &expected.to_string(),
            || enabled(page, id),
            |state: &bool| *state == expected,
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Waits until the checked state of `id` equals `expected`.
    ///
    /// # Errors
    ///
    /// Fails if the state never matches.
    pub async fn expect_selected(&self, id: &str, expected: bool) -> ScenarioResult {
        let page = self.page();
        poll(
            &format!("#{id} selected"),
            &expected.to_string(),
            || selected(page, id),
            |state: &bool| *state == expected,
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Waits until the grid has exactly `expected` controls.
    ///
    /// # Errors
    ///
    /// Fails with the last count seen.
    pub async fn expect_grid_count(&self, expected: usize) -> ScenarioResult {
        let page = self.page();
        poll(
            "question grid size",
            &expected.to_string(),
            || grid_len(page),
            |len: &usize| *len == expected,
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Waits until grid control `index` (zero-based) carries `token` if
    /// `expected`, or lacks it otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the class membership never matches or the control is missing.
    pub async fn expect_grid_class(
        &self,
        index: usize,
        token: &str,
        expected: bool,
    ) -> ScenarioResult {
        let page = self.page();
        poll(
            &format!("class of grid control {}", index + 1),
            &class_expectation(token, expected),
            || grid_has_class(page, index, token),
            |has: &Option<bool>| *has == Some(expected),
            self.wait(),
        )
        .await
        .map(drop)
    }

    /// Waits up to `window` for the text of `id` to differ from `initial`,
    /// returning the new text.
    ///
    /// # Errors
    ///
    /// Fails if the text is still `initial` when the window closes.
    pub async fn expect_text_change(
        &self,
        id: &str,
        initial: &str,
        window: Duration,
    ) -> ScenarioResult<String> {
        let page = self.page();
        poll(
            &format!("text of #{id} after {}ms", window.as_millis()),
            &format!("anything but {initial:?}"),
            || text_of(page, id),
            |text: &String| text != initial,
            WaitConfig::new(window, self.wait().poll_interval),
        )
        .await
    }
}
