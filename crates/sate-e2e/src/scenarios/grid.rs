use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

/// The grid has one control per question and marks answered and current
/// questions with class tokens.
pub struct QuestionGrid;

#[async_trait]
impl Scenario<BrowserSession> for QuestionGrid {
    fn slug(&self) -> &'static str {
        "question-grid"
    }

    fn title(&self) -> &'static str {
        "Question grid"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login("Juliana Silva").await?;
        ui::step("Logged in");

        exam.expect_grid_count(dom::GRID_SIZE).await?;
        ui::step(&format!("{} questions in the grid", dom::GRID_SIZE));

        exam.expect_grid_class(0, dom::ACTIVE, true).await?;
        exam.expect_grid_class(0, dom::ANSWERED, false).await?;
        exam.choose('e').await?;
        exam.expect_grid_class(0, dom::ANSWERED, true).await?;
        ui::step("Question 1 marked answered");

        exam.click_grid(9).await?;
        exam.expect_grid_class(9, dom::ACTIVE, true).await?;
        exam.expect_grid_class(0, dom::ACTIVE, false).await?;
        ui::step("Question 10 marked active, question 1 no longer");

        exam.expect_grid_class(9, dom::ANSWERED, false).await?;
        exam.expect_grid_class(0, dom::ANSWERED, true).await?;
        ui::step("Only answered questions marked answered");
        Ok(())
    }
}
