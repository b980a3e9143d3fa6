use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

/// Previous/next buttons and the grid move between questions; the buttons
/// are disabled at either end.
pub struct Navigation;

#[async_trait]
impl Scenario<BrowserSession> for Navigation {
    fn slug(&self) -> &'static str {
        "navigation"
    }

    fn title(&self) -> &'static str {
        "Navigation"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login("Pedro Oliveira").await?;
        ui::step("Logged in");

        exam.expect_enabled(dom::PREV_BUTTON, false).await?;
        exam.expect_enabled(dom::NEXT_BUTTON, true).await?;
        ui::step("Previous disabled on question 1");

        exam.click_grid(4).await?;
        exam.expect_text(dom::CURRENT_QUESTION, "5").await?;
        ui::step("Grid jump to question 5");

        exam.expect_enabled(dom::PREV_BUTTON, true).await?;
        exam.expect_enabled(dom::NEXT_BUTTON, true).await?;
        ui::step("Both buttons enabled mid-exam");

        exam.click(dom::PREV_BUTTON).await?;
        exam.expect_text(dom::CURRENT_QUESTION, "4").await?;
        ui::step("Previous button works");

        exam.click(dom::NEXT_BUTTON).await?;
        exam.expect_text(dom::CURRENT_QUESTION, "5").await?;
        ui::step("Next button works");

        exam.click_grid(dom::GRID_SIZE - 1).await?;
        exam.expect_text(dom::CURRENT_QUESTION, &dom::GRID_SIZE.to_string()).await?;
        exam.expect_enabled(dom::NEXT_BUTTON, false).await?;
        exam.expect_enabled(dom::PREV_BUTTON, true).await?;
        ui::step("Next disabled on the last question");
        Ok(())
    }
}
