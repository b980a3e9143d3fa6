use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

/// Selecting options bumps the answered counter, across questions.
pub struct AnswerQuestions;

#[async_trait]
impl Scenario<BrowserSession> for AnswerQuestions {
    fn slug(&self) -> &'static str {
        "answer-questions"
    }

    fn title(&self) -> &'static str {
        "Answer questions"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login("Maria Santos").await?;
        ui::step("Logged in");

        exam.expect_text(dom::CURRENT_QUESTION, "1").await?;
        ui::step("Question 1 shown");

        exam.choose('e').await?;
        ui::step("Option E selected");
        exam.expect_text(dom::ANSWERED_COUNT, "1").await?;
        ui::step("Counter updated: 1 answered");

        exam.click(dom::NEXT_BUTTON).await?;
        exam.expect_text(dom::CURRENT_QUESTION, "2").await?;
        ui::step("Moved to question 2");

        exam.choose('b').await?;
        ui::step("Question 2 answered");
        exam.expect_text(dom::ANSWERED_COUNT, "2").await?;
        ui::step("Counter updated: 2 answered");
        Ok(())
    }
}

/// Clearing an answer unchecks the option and decrements the counter.
pub struct ClearAnswer;

#[async_trait]
impl Scenario<BrowserSession> for ClearAnswer {
    fn slug(&self) -> &'static str {
        "clear-answer"
    }

    fn title(&self) -> &'static str {
        "Clear answer"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login("Ana Costa").await?;
        ui::step("Logged in");

        exam.choose('a').await?;
        ui::step("Question answered");

        exam.expect_selected(dom::OPTION_A, true).await?;
        ui::step("Selection confirmed");
        exam.expect_text(dom::ANSWERED_COUNT, "1").await?;

        exam.click(dom::CLEAR_BUTTON).await?;
        ui::step("Clear button clicked");

        exam.expect_selected(dom::OPTION_A, false).await?;
        ui::step("Answer cleared");
        exam.expect_text(dom::ANSWERED_COUNT, "0").await?;
        ui::step("Counter back to 0");
        Ok(())
    }
}
