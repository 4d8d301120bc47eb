// Scenario orchestration
//
// A scenario is an ordered list of named steps over a fresh set of page
// models. The first failing step aborts its scenario and nothing else: the
// runner records the failure, captures a screenshot, closes the session and
// moves on to the next scenario.
//
// Scenarios run one at a time. Each gets its own browser session from the
// `SessionFactory`, so nothing carries over between them.
//
// Artefacts of a scenario live in `<output>/<scenario-slug>/`: the failure
// screenshot and the session recording. Recordings of passing scenarios are
// deleted once the session is closed.

use crate::base_page::BasePage;
use crate::config::SuiteConfig;
use crate::driver::{Driver, SessionFactory};
use crate::error::{Error, Result};
use crate::locator::slug;
use crate::pages::Pages;
use crate::reference::ReferenceData;
use crate::report::{ScenarioOutcome, Status, StepRecord, SuiteReport};
use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// File name of the screenshot taken when a scenario fails
pub const FAILURE_SCREENSHOT: &str = "failure.png";

/// Extension of the session recordings written by the browser
pub const VIDEO_EXTENSION: &str = "webm";

/// Records named steps and attributes failures to them
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<StepRecord>,
    current: Option<(String, Instant)>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `operation` as the step `label`
    ///
    /// On failure the error is wrapped in `Error::StepFailed` naming the step.
    pub async fn run<T, F>(&mut self, label: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        info!("→ {label}");
        self.current = Some((label.to_string(), Instant::now()));
        let result = operation.await;
        let started = self.current.take().map(|(_, at)| at);
        let duration = started.map(|at| at.elapsed()).unwrap_or_default();

        match result {
            Ok(value) => {
                info!("✓ {label}");
                self.steps.push(StepRecord {
                    label: label.to_string(),
                    status: Status::Passed,
                    duration,
                    error: None,
                });
                Ok(value)
            }
            Err(e) => {
                error!("✘ {label}: {e}");
                self.steps.push(StepRecord {
                    label: label.to_string(),
                    status: Status::Failed,
                    duration,
                    error: Some(e.to_string()),
                });
                Err(Error::StepFailed {
                    step: label.to_string(),
                    source: Box::new(e),
                })
            }
        }
    }

    /// Marks the step that was in flight when the scenario was cut off
    fn interrupt(&mut self, reason: &Error) {
        if let Some((label, at)) = self.current.take() {
            self.steps.push(StepRecord {
                label,
                status: Status::Failed,
                duration: at.elapsed(),
                error: Some(reason.to_string()),
            });
        }
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }
}

/// What a scenario gets to work with
pub struct ScenarioContext {
    pub pages: Pages,
    pub reference: Arc<ReferenceData>,
    pub steps: StepRecorder,
}

/// A named, self-contained user journey or failure path
#[async_trait]
pub trait Scenario: Send + Sync {
    fn name(&self) -> &str;

    /// Runs the steps in order; the first error ends the scenario
    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()>;
}

/// Scenarios whose name contains `filter`, ignoring case
pub fn select<'a>(
    scenarios: &'a [Box<dyn Scenario>],
    filter: Option<&str>,
) -> Vec<&'a dyn Scenario> {
    let needle = filter.map(str::to_lowercase);
    scenarios
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| match &needle {
            Some(needle) => s.name().to_lowercase().contains(needle),
            None => true,
        })
        .collect()
}

/// Runs scenarios serially, one fresh session each
pub struct SuiteRunner<'a> {
    config: &'a SuiteConfig,
    sessions: &'a dyn SessionFactory,
    suite_name: String,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(config: &'a SuiteConfig, sessions: &'a dyn SessionFactory) -> Self {
        Self {
            config,
            sessions,
            suite_name: "SauceDemo E2E".to_string(),
        }
    }

    pub fn with_suite_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = name.into();
        self
    }

    /// Runs every scenario; failures are recorded, never propagated
    pub async fn run(&self, scenarios: &[&dyn Scenario]) -> SuiteReport {
        let mut report = SuiteReport::new(&self.suite_name);
        let start = Instant::now();

        for scenario in scenarios {
            let outcome = self.run_one(*scenario).await;
            report.record(outcome);
        }

        report.duration = start.elapsed();
        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "suite finished"
        );
        report
    }

    /// Runs one scenario in its own session
    pub async fn run_one(&self, scenario: &dyn Scenario) -> ScenarioOutcome {
        let name = scenario.name().to_string();
        info!(scenario = %name, "starting");
        let start = Instant::now();
        let artifact_dir = self.config.output_dir.join(slug(&name));

        let opened = match tokio::fs::create_dir_all(&artifact_dir).await {
            Ok(()) => self.sessions.open(&artifact_dir).await,
            Err(e) => Err(Error::from(e).context(format!("creating {}", artifact_dir.display()))),
        };
        let driver = match opened {
            Ok(driver) => driver,
            Err(e) => {
                let e = e.context("opening browser session");
                error!(scenario = %name, "{e}");
                let _ = tokio::fs::remove_dir(&artifact_dir).await;
                return ScenarioOutcome::failed(name, start.elapsed(), Vec::new(), e.to_string());
            }
        };

        let reference = Arc::new(self.config.reference.clone());
        let base = BasePage::new(driver.clone(), self.config.timeouts);
        let mut ctx = ScenarioContext {
            pages: Pages::with_base(base, reference.clone()),
            reference,
            steps: StepRecorder::new(),
        };

        let budget = self.config.timeouts.scenario;
        let finished = tokio::time::timeout(budget, scenario.run(&mut ctx)).await;
        let result = match finished {
            Ok(result) => result,
            Err(_) => {
                let e = Error::ScenarioTimeout {
                    scenario: name.clone(),
                    timeout: budget,
                };
                ctx.steps.interrupt(&e);
                Err(e)
            }
        };

        let steps = ctx.steps.into_steps();
        let mut outcome = match result {
            Ok(()) => {
                info!(scenario = %name, "✓ passed");
                ScenarioOutcome::passed(name.clone(), start.elapsed(), steps)
            }
            Err(e) => {
                error!(scenario = %name, "✘ failed: {e}");
                let outcome =
                    ScenarioOutcome::failed(name.clone(), start.elapsed(), steps, e.to_string());
                match self.capture_failure(driver.as_ref(), &artifact_dir).await {
                    Some(path) => outcome.with_screenshot(path),
                    None => outcome,
                }
            }
        };

        // The recording is only finished once the session is closed
        if let Err(e) = driver.close().await {
            warn!(scenario = %name, "closing session failed: {e}");
        }

        let videos = recordings(&artifact_dir).await;
        if outcome.status.is_passed() {
            discard(&name, &videos, &artifact_dir).await;
        } else if let Some(video) = videos.into_iter().next() {
            outcome = outcome.with_video(video);
        }
        outcome
    }

    async fn capture_failure(&self, driver: &dyn Driver, dir: &Path) -> Option<PathBuf> {
        let path = dir.join(FAILURE_SCREENSHOT);
        match driver.screenshot(&path).await {
            Ok(()) => Some(path),
            Err(e) => {
                warn!("screenshot failed: {e}");
                None
            }
        }
    }
}

/// Session recordings found in `dir`, sorted by name
async fn recordings(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return found;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == VIDEO_EXTENSION) {
            found.push(path);
        }
    }
    found.sort();
    found
}

/// Deletes the recordings of a passing scenario, and its directory once empty
async fn discard(scenario: &str, videos: &[PathBuf], dir: &Path) {
    for video in videos {
        if let Err(e) = tokio::fs::remove_file(video).await {
            warn!(scenario, "cannot delete {}: {e}", video.display());
        }
    }
    // Fails harmlessly when something else was left in the directory
    let _ = tokio::fs::remove_dir(dir).await;
}
