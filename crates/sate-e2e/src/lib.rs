//! SATE end-to-end suite.
//!
//! Drives headless Chrome through the SATE single-page exam
//! (*Sistema de Aplicação de Testes Eletrônicos*) and checks what a student
//! sees: login gating, answering, navigation, clearing answers, the countdown
//! timer, the question grid, and final scoring.
//!
//! # Architecture
//!
//! - [`session`] - one browser per scenario, always closed afterwards
//! - [`exam`] - page object and DOM identifiers of the exam page
//! - [`scenarios`] - the eight test procedures
//! - [`runner`] - runs scenarios in order and summarises the run
//! - [`config`] - layered settings (defaults, `sate.config.json`, `SATE_*`, flags)
//! - [`target`] - turns a URL or path into a loadable URL
//! - [`error`] - scenario, configuration and process errors
//! - [`logger`] / [`ui`] - diagnostics and progress output
//!
//! # Example
//!
//! ```no_run
//! use sate_e2e::{cli::Cli, config::SuiteConfig, runner, scenarios, session::ChromeLauncher};
//!
//! # async fn demo() -> sate_e2e::Result<()> {
//! let cli = Cli {
//!     target: Some("index.html".into()),
//!     ..Cli::default()
//! };
//! let config = SuiteConfig::load(&cli)?;
//! let launcher = ChromeLauncher::new(config.browser_config(), config.session_settings()?);
//!
//! let summary = runner::run(&launcher, &scenarios::all(), &config.only).await;
//! summary.exit_status(config.exit_policy)
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exam;
pub mod logger;
pub mod runner;
pub mod scenarios;
pub mod session;
pub mod target;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ScenarioError, ScenarioResult};
