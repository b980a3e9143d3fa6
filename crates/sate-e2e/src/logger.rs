//! Logging setup.
//!
//! Diagnostics go through `tracing`; the human-readable progress lines are
//! printed by [`crate::ui`]. Verbosity, in priority order:
//! 1. `--verbose`: debug for the suite and the browser crate
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. default: info for the suite, warnings from the browser crate
//!
//! chromiumoxide is noisy at every level and stays filtered out unless
//! `RUST_LOG` asks for it.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "sate_e2e=debug,sate_browser_test=debug";
const QUIET_FILTER: &str = "sate_e2e=error,sate_browser_test=error";
const DEFAULT_FILTER: &str = "sate_e2e=info,sate_browser_test=warn";

/// Picks the filter directive for the given flags.
#[must_use]
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Installs the global subscriber. Call once, before anything logs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // try_init: tests and embedders may already have a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}
