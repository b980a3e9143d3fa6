use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

/// Pressing start with an empty name keeps the login view up.
pub struct LoginValidation;

#[async_trait]
impl Scenario<BrowserSession> for LoginValidation {
    fn slug(&self) -> &'static str {
        "login-validation"
    }

    fn title(&self) -> &'static str {
        "Login validation"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;

        exam.press_login().await?;
        exam.expect_stays_displayed(dom::LOGIN_SCREEN).await?;
        exam.ensure_dialogs_answered()?;
        ui::step("Empty name rejected, still on the login screen");

        if let Some(dialog) = exam.page().dialogs().last() {
            ui::info(&format!("Page answered with a {}: {}", dialog.kind, dialog.message));
        }
        Ok(())
    }
}

/// A valid name opens the exam view and is shown in its header.
pub struct Login;

const STUDENT: &str = "João da Silva";

#[async_trait]
impl Scenario<BrowserSession> for Login {
    fn slug(&self) -> &'static str {
        "login"
    }

    fn title(&self) -> &'static str {
        "Login"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        ui::step("Page loaded");
        ui::step("Login screen visible");

        exam.type_into(dom::STUDENT_NAME, STUDENT).await?;
        ui::step("Name entered");

        exam.press_login().await?;
        ui::step("Start button clicked");

        exam.expect_displayed(dom::EXAM_SCREEN).await?;
        ui::step("Exam screen loaded");

        exam.expect_text_containing(dom::STUDENT_INFO, STUDENT).await?;
        ui::step("Student name shown");
        Ok(())
    }
}
