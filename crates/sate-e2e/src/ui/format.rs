//! Banners, durations, and the end-of-run summary.

use crate::runner::RunSummary;
use owo_colors::{OwoColorize, Stream::Stderr};
use std::time::Duration;

const BANNER_WIDTH: usize = 52;

/// Format a duration the way the summary prints it.
///
/// ```
/// use std::time::Duration;
/// use sate_e2e::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// A boxed banner with each line left-aligned inside the frame.
///
/// Lines longer than the frame are not truncated; the frame simply grows.
#[must_use]
pub fn banner(lines: &[&str]) -> String {
    let inner = lines
        .iter()
        .map(|l| l.chars().count() + 3)
        .max()
        .unwrap_or(0)
        .max(BANNER_WIDTH);

    let mut out = String::new();
    out.push('╔');
    out.push_str(&"═".repeat(inner));
    out.push_str("╗\n");
    for line in lines {
        let pad = inner - 3 - line.chars().count();
        out.push_str(&format!("║   {line}{}║\n", " ".repeat(pad)));
    }
    out.push('╚');
    out.push_str(&"═".repeat(inner));
    out.push('╝');
    out
}

/// Banner printed once before the first scenario.
pub fn print_run_banner() {
    let text = banner(&[
        "SATE END-TO-END TESTS",
        "Sistema de Aplicação de Testes Eletrônicos",
    ]);
    eprintln!("{}", text.if_supports_color(Stderr, |t| t.cyan()));
}

/// Closing summary: total time, tally, and which scenarios failed.
pub fn print_summary(summary: &RunSummary) {
    eprintln!("\n{}", banner(&["TEST SUMMARY"]));
    eprintln!(
        "Total run time: {}",
        format_duration(summary.elapsed).if_supports_color(Stderr, |t| t.bold())
    );

    let tally = format!(
        "{} scenarios: {} passed, {} failed",
        summary.total(),
        summary.passed(),
        summary.failed()
    );
    if summary.failed() == 0 {
        eprintln!("{}", tally.if_supports_color(Stderr, |t| t.green()));
    } else {
        eprintln!("{}", tally.if_supports_color(Stderr, |t| t.red()));
        for report in summary.failures() {
            eprintln!(
                "  {} {}",
                "✗".if_supports_color(Stderr, |t| t.red()),
                report.title
            );
        }
    }

    eprintln!("\n✅ All scenarios were executed.");
    eprintln!("Check the output above for the details of any failure.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_are_aligned() {
        let text = banner(&["TEST SUMMARY", "Sistema de Aplicação"]);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == BANNER_WIDTH + 2));
        assert!(text.starts_with('╔'));
        assert!(text.ends_with('╝'));
    }

    #[test]
    fn banner_grows_for_long_lines() {
        let long = "x".repeat(80);
        let text = banner(&[&long]);
        assert!(text.lines().all(|l| l.chars().count() == 85));
    }

    #[test]
    fn durations_pick_a_unit() {
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(12_340)), "12.34s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
