use crate::error::ScenarioResult;
use crate::exam::{dom, ExamPage};
use crate::session::{BrowserSession, Scenario};
use crate::ui;
use async_trait::async_trait;

const STUDENT: &str = "Roberto Alves";

/// Options picked for questions 1 to 5; every other question is left blank.
const ANSWERS: [char; 5] = ['e', 'b', 'b', 'a', 'a'];

/// Figures the results view must show for [`ANSWERS`].
const EXPECTED_SCORE: &str = "3";
const EXPECTED_TOTAL: &str = "40";
const EXPECTED_CORRECT: &str = "3";
const EXPECTED_INCORRECT: &str = "2";
const EXPECTED_BLANK: &str = "35";

/// Answers five questions, submits, and checks every figure on the results
/// view.
pub struct FinishExam;

#[async_trait]
impl Scenario<BrowserSession> for FinishExam {
    fn slug(&self) -> &'static str {
        "finish-exam"
    }

    fn title(&self) -> &'static str {
        "Finish exam"
    }

    async fn run(&self, session: &BrowserSession) -> ScenarioResult {
        let exam = ExamPage::new(session);
        exam.open().await?;
        exam.login(STUDENT).await?;
        ui::step("Logged in");

        for (index, letter) in ANSWERS.iter().enumerate() {
            if index > 0 {
                exam.click(dom::NEXT_BUTTON).await?;
            }
            exam.expect_text(dom::CURRENT_QUESTION, &(index + 1).to_string()).await?;
            exam.choose(*letter).await?;
            exam.expect_text(dom::ANSWERED_COUNT, &(index + 1).to_string()).await?;
        }

        ui::step(&format!("{} questions answered", ANSWERS.len()));

        if exam.finish().await? {
            ui::step("Confirmation accepted");
        }
        ui::step("Results screen visible");

        exam.expect_text(dom::FINAL_SCORE, EXPECTED_SCORE).await?;
        ui::step(&format!("Score: {EXPECTED_SCORE}/{EXPECTED_TOTAL}"));

        exam.expect_text(dom::TOTAL_QUESTIONS, EXPECTED_TOTAL).await?;
        ui::step(&format!("Total questions: {EXPECTED_TOTAL}"));

        let percentage = exam.expect_text_containing(dom::SCORE_PERCENTAGE, "%").await?;
        ui::step(&format!("Percentage shown: {percentage}"));

        exam.expect_text(dom::FINAL_STUDENT_NAME, STUDENT).await?;
        ui::step(&format!("Student name on results: {STUDENT}"));

        exam.expect_text(dom::CORRECT_COUNT, EXPECTED_CORRECT).await?;
        ui::step(&format!("Correct: {EXPECTED_CORRECT}"));

        exam.expect_text(dom::INCORRECT_COUNT, EXPECTED_INCORRECT).await?;
        ui::step(&format!("Incorrect: {EXPECTED_INCORRECT}"));

        exam.expect_text(dom::BLANK_COUNT, EXPECTED_BLANK).await?;
        ui::step(&format!("Blank: {EXPECTED_BLANK}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(figure: &str) -> usize {
        figure.parse().unwrap()
    }

    #[test]
    fn expected_figures_cover_every_question() {
        assert_eq!(count(EXPECTED_TOTAL), dom::GRID_SIZE);
        assert_eq!(
            count(EXPECTED_CORRECT) + count(EXPECTED_INCORRECT),
            ANSWERS.len()
        );
        assert_eq!(
            count(EXPECTED_CORRECT) + count(EXPECTED_INCORRECT) + count(EXPECTED_BLANK),
            count(EXPECTED_TOTAL)
        );
        assert_eq!(EXPECTED_SCORE, EXPECTED_CORRECT);
    }

    #[test]
    fn every_scripted_answer_is_an_option() {
        assert!(ANSWERS.iter().all(|letter| dom::option(*letter).is_some()));
    }
}
