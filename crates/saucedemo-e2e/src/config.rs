// Suite configuration
//
// Loaded once at process start: defaults, then an optional JSON file, then
// SAUCEDEMO_* environment variables. The resulting value is immutable and
// passed by reference to the runner, pages and scenarios.

use crate::error::{Error, Result};
use crate::reference::{Credentials, DEFAULT_BASE_URL, ReferenceData};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the application base URL
pub const ENV_BASE_URL: &str = "SAUCEDEMO_BASE_URL";
/// Environment variable toggling headless mode (`true`/`false`/`1`/`0`)
pub const ENV_HEADLESS: &str = "SAUCEDEMO_HEADLESS";
/// Environment variable overriding the artefact directory
pub const ENV_OUTPUT_DIR: &str = "SAUCEDEMO_OUTPUT_DIR";
/// Environment variable overriding the post-fill settle delay in milliseconds
pub const ENV_SETTLE_MS: &str = "SAUCEDEMO_SETTLE_MS";

/// Wait budgets used by the page primitives and the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Wait for an element to become visible or clickable
    pub element: Duration,
    /// Polling budget of explicit assertions
    pub assertion: Duration,
    /// Engine-side budget for clicks and fills
    pub action: Duration,
    /// Engine-side budget for navigations
    pub navigation: Duration,
    /// Pause after writing into a form field
    pub settle: Duration,
    /// Whole-scenario budget
    pub scenario: Duration,
    /// Interval between two polls of a condition
    pub poll_interval: Duration,
    /// How long the network must stay quiet before a page counts as loaded
    pub network_quiet: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            element: Duration::from_secs(10),
            assertion: Duration::from_secs(10),
            action: Duration::from_secs(30),
            navigation: Duration::from_secs(30),
            settle: Duration::from_millis(1000),
            scenario: Duration::from_secs(120),
            poll_interval: Duration::from_millis(100),
            network_quiet: Duration::from_millis(500),
        }
    }
}

/// How the browser is launched for each run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub headless: bool,
    /// Open the window maximized and let the page use the full window size
    pub maximized: bool,
    /// Extra command-line switches passed to the browser
    pub args: Vec<String>,
    /// Record every session; the recording is kept only when the scenario fails
    pub record_video: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            maximized: true,
            args: Vec::new(),
            record_video: true,
        }
    }
}

impl BrowserSettings {
    /// Full argument list handed to the browser at launch
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        if self.maximized && !args.iter().any(|a| a == "--start-maximized") {
            args.push("--start-maximized".to_string());
        }
        args
    }
}

/// Complete configuration of one suite run
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub reference: ReferenceData,
    pub timeouts: Timeouts,
    pub browser: BrowserSettings,
    /// Directory receiving reports, failure screenshots and recordings
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            reference: ReferenceData::default(),
            timeouts: Timeouts::default(),
            browser: BrowserSettings::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// On-disk shape of the optional JSON configuration file
///
/// Every field is optional; absent fields keep their defaults. Durations are
/// given in milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
    base_url: Option<String>,
    headless: Option<bool>,
    maximized: Option<bool>,
    browser_args: Option<Vec<String>>,
    record_video: Option<bool>,
    output_dir: Option<PathBuf>,
    valid_user: Option<Credentials>,
    element_timeout_ms: Option<u64>,
    assertion_timeout_ms: Option<u64>,
    action_timeout_ms: Option<u64>,
    navigation_timeout_ms: Option<u64>,
    settle_ms: Option<u64>,
    scenario_timeout_ms: Option<u64>,
}

impl SuiteConfig {
    /// Loads configuration: defaults, then `path` (if any), then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a JSON configuration file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parses JSON configuration text on top of the defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw)
            .map_err(|e| Error::Config(format!("invalid configuration file: {e}")))?;

        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.set_base_url(&base_url)?;
        }
        if let Some(user) = file.valid_user {
            config.reference.valid_user = user;
        }
        if let Some(headless) = file.headless {
            config.browser.headless = headless;
        }
        if let Some(maximized) = file.maximized {
            config.browser.maximized = maximized;
        }
        if let Some(args) = file.browser_args {
            config.browser.args = args;
        }
        if let Some(record) = file.record_video {
            config.browser.record_video = record;
        }
        if let Some(dir) = file.output_dir {
            config.output_dir = dir;
        }

        let t = &mut config.timeouts;
        for (slot, value) in [
            (&mut t.element, file.element_timeout_ms),
            (&mut t.assertion, file.assertion_timeout_ms),
            (&mut t.action, file.action_timeout_ms),
            (&mut t.navigation, file.navigation_timeout_ms),
            (&mut t.settle, file.settle_ms),
            (&mut t.scenario, file.scenario_timeout_ms),
        ] {
            if let Some(ms) = value {
                *slot = Duration::from_millis(ms);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Applies `SAUCEDEMO_*` overrides read through `lookup`.
    ///
    /// Taking the lookup as a function keeps tests away from the real
    /// process environment.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.set_base_url(&base_url)?;
        }
        if let Some(raw) = lookup(ENV_HEADLESS) {
            self.browser.headless = parse_bool(ENV_HEADLESS, &raw)?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_SETTLE_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_SETTLE_MS} must be milliseconds, got '{raw}'"))
            })?;
            self.timeouts.settle = Duration::from_millis(ms);
        }
        self.validate()
    }

    /// Points the suite at another deployment of the application.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        let mut reference = ReferenceData::for_base_url(base_url)?;
        reference.valid_user = self.reference.valid_user.clone();
        self.reference = reference;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let t = &self.timeouts;
        for (name, value) in [
            ("element timeout", t.element),
            ("assertion timeout", t.assertion),
            ("action timeout", t.action),
            ("navigation timeout", t.navigation),
            ("scenario timeout", t.scenario),
        ] {
            if value.is_zero() {
                return Err(Error::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output directory must not be empty".to_string()));
        }
        Ok(())
    }

    /// True when the suite targets the public demo deployment
    pub fn targets_default_site(&self) -> bool {
        self.reference.urls.base.as_str() == DEFAULT_BASE_URL
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::Config(format!("{key} must be a boolean, got '{raw}'"))),
    }
}
