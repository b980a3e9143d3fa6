//! Sequential scenario runner.

use crate::config::ExitPolicy;
use crate::error::{CliError, Result};
use crate::session::{run_scenario, Launcher, Scenario, ScenarioReport};
use crate::ui;
use std::time::{Duration, Instant};
use tracing::info;

/// Reports of one run, in execution order, plus total wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// One report per executed scenario
    pub reports: Vec<ScenarioReport>,
    /// Time from the first launch to the last close
    pub elapsed: Duration,
}

impl RunSummary {
    /// Number of scenarios run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of scenarios that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    /// Number of scenarios that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// The failed reports, in execution order.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.reports.iter().filter(|r| !r.passed())
    }

    /// Turns the run into a process result under `policy`.
    ///
    /// # Errors
    ///
    /// Returns `ScenariosFailed` only under [`ExitPolicy::FailOnError`] and
    /// only if a scenario failed.
    pub fn exit_status(&self, policy: ExitPolicy) -> Result<()> {
        match policy {
            ExitPolicy::FailOnError if self.failed() > 0 => Err(CliError::ScenariosFailed {
                failed: self.failed(),
                total: self.total(),
            }),
            _ => Ok(()),
        }
    }
}

/// Keeps the scenarios named in `only`, in their original order. An empty
/// filter keeps everything.
pub fn select<'s, S: Sync>(
    scenarios: &'s [Box<dyn Scenario<S>>],
    only: &[String],
) -> Vec<&'s dyn Scenario<S>> {
    scenarios
        .iter()
        .map(|s| &**s)
        .filter(|s| only.is_empty() || only.iter().any(|slug| slug == s.slug()))
        .collect()
}

/// Runs the selected scenarios one after another, each in its own session.
///
/// Prints the run banner first and the summary last. Scenario failures are
/// recorded in the summary and never stop the run.
pub async fn run<L: Launcher>(
    launcher: &L,
    scenarios: &[Box<dyn Scenario<L::Session>>],
    only: &[String],
) -> RunSummary {
    let selected = select(scenarios, only);
    ui::print_run_banner();
    info!("Running {} of {} scenarios", selected.len(), scenarios.len());

    let start = Instant::now();
    let mut reports = Vec::with_capacity(selected.len());
    for (index, scenario) in selected.into_iter().enumerate() {
        reports.push(run_scenario(launcher, index + 1, scenario).await);
    }

    let summary = RunSummary {
        reports,
        elapsed: start.elapsed(),
    };
    ui::print_summary(&summary);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::{CountingLauncher, FakeSession, Scripted};

    fn scripted() -> Vec<Box<dyn Scenario<FakeSession>>> {
        vec![
            Box::new(Scripted::Pass("login-validation")),
            Box::new(Scripted::Assert("login")),
            Box::new(Scripted::Pass("answer-questions")),
            Box::new(Scripted::Panic("navigation")),
            Box::new(Scripted::Timeout("timer")),
        ]
    }

    #[tokio::test]
    async fn every_scenario_runs_in_order_despite_failures() {
        let launcher = CountingLauncher::default();
        let summary = run(&launcher, &scripted(), &[]).await;

        let order: Vec<&str> = summary.reports.iter().map(|r| r.slug).collect();
        assert_eq!(
            order,
            ["login-validation", "login", "answer-questions", "navigation", "timer"]
        );
        assert_eq!((summary.passed(), summary.failed()), (2, 3));
        assert_eq!((launcher.opened(), launcher.closed()), (5, 5));
    }

    #[tokio::test]
    async fn sessions_never_overlap() {
        let launcher = CountingLauncher::default();
        run(&launcher, &scripted(), &[]).await;

        let log = launcher.log.lock().unwrap();
        for pair in log.chunks(2) {
            assert!(pair[0].starts_with("open"), "{pair:?}");
            assert!(pair[1].starts_with("close"), "{pair:?}");
            assert_eq!(pair[0][5..], pair[1][6..]);
        }
    }

    #[tokio::test]
    async fn filter_keeps_canonical_order() {
        let launcher = CountingLauncher::default();
        let only = vec!["timer".to_string(), "login-validation".to_string()];
        let summary = run(&launcher, &scripted(), &only).await;

        let order: Vec<&str> = summary.reports.iter().map(|r| r.slug).collect();
        assert_eq!(order, ["login-validation", "timer"]);
        assert_eq!(launcher.opened(), 2);
    }

    #[test]
    fn exit_policy_decides_status() {
        let failed = RunSummary {
            reports: vec![ScenarioReport {
                slug: "finish-exam",
                title: "Finish exam",
                outcome: crate::session::Outcome::Failed {
                    message: "score".into(),
                },
                elapsed: Duration::ZERO,
            }],
            elapsed: Duration::ZERO,
        };

        assert!(failed.exit_status(ExitPolicy::AlwaysSuccess).is_ok());
        assert!(matches!(
            failed.exit_status(ExitPolicy::FailOnError),
            Err(CliError::ScenariosFailed { failed: 1, total: 1 })
        ));
        assert!(RunSummary::default()
            .exit_status(ExitPolicy::FailOnError)
            .is_ok());
    }
}
