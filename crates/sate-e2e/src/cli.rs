//! Command-line interface definition.
//!
//! `sate-e2e` has a single command: run the scenarios against a target exam
//! page. Every option here can also come from `sate.config.json` or a
//! `SATE_*` environment variable; flags win over both.

use crate::config::ExitPolicy;
use clap::Parser;
use std::path::PathBuf;

/// End-to-end browser tests for the SATE exam page
#[derive(Parser, Debug, Default)]
#[command(
    name = "sate-e2e",
    version,
    about = "End-to-end browser tests for the SATE exam page",
    long_about = "Drives headless Chrome through the SATE single-page exam: login gating,\n\
                  answering, navigation, clearing answers, the countdown timer, the\n\
                  question grid, and final scoring. Each scenario runs in a fresh browser."
)]
pub struct Cli {
    /// Exam page to test: a URL or a path to index.html
    #[arg(short, long, value_name = "URL_OR_PATH")]
    pub target: Option<String>,

    /// Configuration file (default: ./sate.config.json if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Chrome/Chromium executable (default: auto-detect)
    #[arg(long, value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub visible: bool,

    /// Upper bound for every wait, in milliseconds
    #[arg(long, value_name = "MS")]
    pub wait_timeout_ms: Option<u64>,

    /// Whether failing scenarios make the process exit non-zero
    #[arg(long, value_enum)]
    pub exit_policy: Option<ExitPolicy>,

    /// Run only this scenario (repeatable or comma-separated); see --list
    #[arg(long = "only", value_name = "SCENARIO", value_delimiter = ',')]
    pub only: Vec<String>,

    /// Print the scenario names and exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
