use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

/// The countdown starts at two hours and ticks.
pub struct Timer;

#[async_trait]
impl Scenario<BrowserSession> for Timer {
    fn slug(&self) -> &'static str {
        "timer"
    }

    fn title(&self) -> &'static str {
        "Timer"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login("Carlos Mendes").await?;
        ui::step("Logged in");

        let initial = exam.expect_text_containing(dom::TIMER, "2 h").await?;
        ui::step(&format!("Initial timer: {initial}"));

        let window = session.settings().timer_window;
        let updated = exam.expect_text_change(dom::TIMER, &initial, window).await?;
        ui::step(&format!("Timer updated: {updated}"));
        Ok(())
    }
}
