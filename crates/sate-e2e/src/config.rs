//! Layered run configuration.
//!
//! Priority, lowest to highest: built-in defaults, `sate.config.json` (or the
//! file given with `--config`), `SATE_*` environment variables, command-line
//! flags. Keys are snake_case in every layer, so `wait_timeout_ms` in JSON is
//! `SATE_WAIT_TIMEOUT_MS` in the environment.

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::scenarios;
use crate::session::SessionSettings;
use crate::target::ExamTarget;
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use sate_browser_test::{TestBrowserConfig, WaitConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "sate.config.json";

/// Whether scenario failures affect the process exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Exit 0 whenever the run completes; failures are only printed
    #[default]
    AlwaysSuccess,
    /// Exit non-zero if any scenario failed
    FailOnError,
}

/// Everything a run needs, after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Exam page URL or filesystem path. Required.
    pub target: Option<String>,
    /// Run Chrome without a window
    pub headless: bool,
    /// Chrome executable; auto-detected when absent
    pub chrome_path: Option<PathBuf>,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Bound for every wait
    pub wait_timeout_ms: u64,
    /// Poll period for waits
    pub poll_interval_ms: u64,
    /// Bound for observing the countdown timer change
    pub timer_window_ms: u64,
    /// How long a "stays on screen" check keeps watching
    pub hold_window_ms: u64,
    /// See [`ExitPolicy`]
    pub exit_policy: ExitPolicy,
    /// Scenario slugs to run; empty runs all. Also accepts one
    /// comma-separated string, as in `SATE_ONLY=login,timer`.
    #[serde(deserialize_with = "slug_list")]
    pub only: Vec<String>,
}

/// A slug list written either as a sequence or as `"a,b"`.
fn slug_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Slugs {
        Joined(String),
        List(Vec<String>),
    }

    let slugs = match Slugs::deserialize(deserializer)? {
        Slugs::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        Slugs::List(list) => list,
    };
    Ok(slugs
        .into_iter()
        .map(|slug| slug.trim().to_string())
        .filter(|slug| !slug.is_empty())
        .collect())
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            target: None,
            headless: true,
            chrome_path: None,
            window_width: 1920,
            window_height: 1080,
            wait_timeout_ms: 10_000,
            poll_interval_ms: 100,
            timer_window_ms: 5_000,
            hold_window_ms: 500,
            exit_policy: ExitPolicy::AlwaysSuccess,
            only: Vec::new(),
        }
    }
}

/// Only the flags the user actually passed; `None` leaves lower layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    headless: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chrome_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_policy: Option<ExitPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    only: Option<Vec<String>>,
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            target: cli.target.clone(),
            headless: cli.visible.then_some(false),
            chrome_path: cli.chrome_path.clone(),
            wait_timeout_ms: cli.wait_timeout_ms,
            exit_policy: cli.exit_policy,
            only: (!cli.only.is_empty()).then(|| cli.only.clone()),
        }
    }
}

impl SuiteConfig {
    /// Loads and validates the configuration for a run.
    ///
    /// # Errors
    ///
    /// Fails if an explicit config file is missing, a layer does not
    /// deserialize, or the merged result is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let config_file = match &cli.config {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.clone())),
            Some(path) => Some(path.clone()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        let config = Self::figment(config_file.as_deref(), cli)
            .extract::<Self>()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    fn figment(config_file: Option<&Path>, cli: &Cli) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        figment
            .merge(Env::prefixed("SATE_"))
            .merge(Serialized::defaults(CliOverrides::from(cli)))
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.target.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ConfigError::MissingField {
                    field: "target".to_string(),
                    hint: "Pass --target <URL_OR_PATH>, set SATE_TARGET, or add \"target\" to sate.config.json".to_string(),
                })
            }
            Some(_) => {}
        }

        for (field, value) in [
            ("wait_timeout_ms", self.wait_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
            ("timer_window_ms", self.timer_window_ms),
            ("hold_window_ms", self.hold_window_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: "0".to_string(),
                    hint: "Use a positive number of milliseconds".to_string(),
                });
            }
        }

        if let Some(unknown) = self.only.iter().find(|s| !scenarios::is_known(s)) {
            return Err(ConfigError::InvalidValue {
                field: "only".to_string(),
                value: unknown.clone(),
                hint: format!("Known scenarios: {}", scenarios::SLUGS.join(", ")),
            });
        }

        Ok(())
    }

    /// Browser launch options for each session.
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config =
            TestBrowserConfig::new().with_window_size(self.window_width, self.window_height);
        if !self.headless {
            config = config.visible();
        }
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path.clone());
        }
        config
    }

    /// Bound and poll period used by every wait in a scenario. The poll
    /// period never exceeds the bound.
    #[must_use]
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::new(
            Duration::from_millis(self.wait_timeout_ms),
            Duration::from_millis(self.poll_interval_ms.min(self.wait_timeout_ms)),
        )
    }

    /// Resolves the target and bundles the per-session settings.
    ///
    /// # Errors
    ///
    /// Fails if the target is missing or cannot be resolved to a URL.
    pub fn session_settings(&self) -> Result<SessionSettings, ConfigError> {
        let raw = self.target.as_deref().unwrap_or_default();
        let target = ExamTarget::parse(raw)?;
        Ok(SessionSettings {
            target_url: target.url().to_string(),
            wait: self.wait_config(),
            timer_window: Duration::from_millis(self.timer_window_ms),
            hold_window: Duration::from_millis(self.hold_window_ms),
        })
    }
}
