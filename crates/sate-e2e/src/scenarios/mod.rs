//! The eight exam scenarios.
//!
//! Each scenario is a unit struct implementing [`Scenario`] over a
//! [`BrowserSession`]: it logs in under its own student name, drives the page
//! through [`ExamPage`](crate::exam::ExamPage), and prints one `✓` line per
//! check that held. None depends on another's outcome.

mod answers;
mod finish;
mod grid;
mod login;
mod navigation;
mod timer;

pub use answers::{AnswerQuestions, ClearAnswer};
pub use finish::FinishExam;
pub use grid::QuestionGrid;
pub use login::{Login, LoginValidation};
pub use navigation::Navigation;
pub use timer::Timer;

use crate::session::{BrowserSession, Scenario};

/// Scenario slugs in run order.
pub const SLUGS: [&str; 8] = [
    "login-validation",
    "login",
    "answer-questions",
    "navigation",
    "clear-answer",
    "timer",
    "question-grid",
    "finish-exam",
];

/// Whether `slug` names a scenario.
#[must_use]
pub fn is_known(slug: &str) -> bool {
    SLUGS.contains(&slug)
}

/// Every scenario, in run order.
#[must_use]
pub fn all() -> Vec<Box<dyn Scenario<BrowserSession>>> {
    vec![
        Box::new(LoginValidation),
        Box::new(Login),
        Box::new(AnswerQuestions),
        Box::new(Navigation),
        Box::new(ClearAnswer),
        Box::new(Timer),
        Box::new(QuestionGrid),
        Box::new(FinishExam),
    ]
}
