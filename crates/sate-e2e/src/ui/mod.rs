//! Terminal output for humans.
//!
//! Every line a tester reads while the suite runs comes from here: the run
//! banner, one header per scenario, a `✓` per passed check, the per-scenario
//! verdict, and the closing summary. All of it goes to stderr.
//!
//! ```no_run
//! use sate_e2e::ui;
//!
//! ui::init_colors(false);
//! ui::step("Login screen visible");
//! ui::scenario_passed("Login");
//! ```

mod format;
mod messages;

pub use format::{banner, format_duration, print_run_banner, print_summary};
pub use messages::{
    info, scenario_failed, scenario_header, scenario_passed, step, warning,
};

/// Whether to emit ANSI colours.
///
/// `--no-color` and `NO_COLOR` disable them, `FORCE_COLOR` forces them,
/// otherwise they follow whether stderr is a terminal.
#[must_use]
pub fn should_use_color(no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Applies the colour decision globally. Call once from `main`.
pub fn init_colors(no_color: bool) {
    owo_colors::set_override(should_use_color(no_color));
}
