//! Progress lines printed while scenarios run.

use owo_colors::{OwoColorize, Stream::Stderr};

/// Header printed before a scenario opens its browser.
pub fn scenario_header(index: usize, title: &str) {
    let line = format!("=== Scenario {index}: {title} ===");
    eprintln!("\n{}", line.if_supports_color(Stderr, |t| t.bold()));
}

/// One passed check inside a scenario.
pub fn step(message: &str) {
    eprintln!("{} {}", "✓".if_supports_color(Stderr, |t| t.green()), message);
}

/// Neutral progress information.
pub fn info(message: &str) {
    eprintln!("{} {}", "ℹ".if_supports_color(Stderr, |t| t.blue()), message);
}

/// Something worth noticing that does not fail the scenario.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        "⚠".if_supports_color(Stderr, |t| t.yellow()),
        message.if_supports_color(Stderr, |t| t.yellow())
    );
}

/// Verdict line for a passing scenario.
pub fn scenario_passed(title: &str) {
    let line = format!("{title}: PASSED");
    eprintln!("✅ {}", line.if_supports_color(Stderr, |t| t.green()));
}

/// Verdict line for a failing scenario, followed by the reason.
pub fn scenario_failed(title: &str, reason: &str) {
    let line = format!("{title}: FAILED");
    eprintln!("❌ {}", line.if_supports_color(Stderr, |t| t.red()));
    eprintln!("   {}", reason.if_supports_color(Stderr, |t| t.red()));
}
