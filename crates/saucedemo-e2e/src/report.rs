// Report - Outcomes of a suite run and their renderings
//
// One run produces a `SuiteReport`. It is printed as a console list and
// written to the output directory as JUnit XML (`junit.xml`), JSON
// (`results.json`) and a static HTML summary (`index.html`).

use crate::error::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const JUNIT_FILE: &str = "junit.xml";
pub const JSON_FILE: &str = "results.json";
pub const HTML_FILE: &str = "index.html";

/// Result of one step or scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
}

impl Status {
    pub const fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }

    fn symbol(&self) -> &'static str {
        match self {
            Status::Passed => "✓",
            Status::Failed => "✘",
        }
    }
}

/// One named step as it was executed
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub label: String,
    pub status: Status,
    #[serde(rename = "durationMs", serialize_with = "as_millis")]
    pub duration: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything known about one scenario after it ran
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: Status,
    #[serde(rename = "durationMs", serialize_with = "as_millis")]
    pub duration: Duration,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<PathBuf>,
}

impl ScenarioOutcome {
    pub fn passed(name: impl Into<String>, duration: Duration, steps: Vec<StepRecord>) -> Self {
        Self {
            name: name.into(),
            status: Status::Passed,
            duration,
            steps,
            failed_step: None,
            error: None,
            screenshot: None,
            video: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        duration: Duration,
        steps: Vec<StepRecord>,
        error: impl Into<String>,
    ) -> Self {
        let failed_step = steps
            .iter()
            .find(|s| !s.status.is_passed())
            .map(|s| s.label.clone());
        Self {
            name: name.into(),
            status: Status::Failed,
            duration,
            steps,
            failed_step,
            error: Some(error.into()),
            screenshot: None,
            video: None,
        }
    }

    pub fn with_screenshot(mut self, path: PathBuf) -> Self {
        self.screenshot = Some(path);
        self
    }

    pub fn with_video(mut self, path: PathBuf) -> Self {
        self.video = Some(path);
        self
    }

    /// Screenshot and video, in that order, for whichever were captured
    pub fn attachments(&self) -> impl Iterator<Item = &PathBuf> {
        self.screenshot.iter().chain(self.video.iter())
    }
}

/// All scenario outcomes of one run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
    pub suite: String,
    /// Seconds since the Unix epoch when the run started
    pub started_at: u64,
    #[serde(rename = "durationMs", serialize_with = "as_millis")]
    pub duration: Duration,
    pub scenarios: Vec<ScenarioOutcome>,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            suite: suite.into(),
            started_at,
            duration: Duration::ZERO,
            scenarios: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ScenarioOutcome) {
        self.scenarios.push(outcome);
    }

    pub fn passed_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.status.is_passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.scenarios.len() - self.passed_count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    /// Console listing: one line per scenario, failing steps underneath
    pub fn render_list(&self) -> String {
        let mut out = String::new();
        for (i, outcome) in self.scenarios.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {} {:>2} {} ({}ms)",
                outcome.status.symbol(),
                i + 1,
                outcome.name,
                outcome.duration.as_millis()
            );
            if let Some(error) = &outcome.error {
                if let Some(step) = &outcome.failed_step {
                    let _ = writeln!(out, "       step: {step}");
                }
                let _ = writeln!(out, "       {error}");
                if let Some(path) = &outcome.screenshot {
                    let _ = writeln!(out, "       screenshot: {}", path.display());
                }
                if let Some(path) = &outcome.video {
                    let _ = writeln!(out, "       video: {}", path.display());
                }
            }
        }
        let _ = writeln!(
            out,
            "\n  {} passed, {} failed ({:.1}s)",
            self.passed_count(),
            self.failed_count(),
            self.duration.as_secs_f64()
        );
        out
    }

    /// JUnit XML, one testcase per scenario
    pub fn render_junit(&self) -> String {
        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(
            xml,
            r#"<testsuite name="{}" tests="{}" failures="{}" time="{:.3}">"#,
            escape_xml(&self.suite),
            self.scenarios.len(),
            self.failed_count(),
            self.duration.as_secs_f64()
        );

        for outcome in &self.scenarios {
            let _ = writeln!(
                xml,
                r#"  <testcase classname="{}" name="{}" time="{:.3}">"#,
                escape_xml(&self.suite),
                escape_xml(&outcome.name),
                outcome.duration.as_secs_f64()
            );
            if let Some(error) = &outcome.error {
                let message = match &outcome.failed_step {
                    Some(step) => format!("{step}: {error}"),
                    None => error.clone(),
                };
                let _ = writeln!(
                    xml,
                    r#"    <failure message="{}">{}</failure>"#,
                    escape_xml(&message),
                    escape_xml(&step_log(outcome))
                );
            }
            let attachments: Vec<String> = outcome
                .attachments()
                .map(|path| format!("[[ATTACHMENT|{}]]", escape_xml(&path.display().to_string())))
                .collect();
            if !attachments.is_empty() {
                let _ = writeln!(
                    xml,
                    "    <system-out>{}</system-out>",
                    attachments.join("\n")
                );
            }
            xml.push_str("  </testcase>\n");
        }

        xml.push_str("</testsuite>\n");
        xml
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Self-contained HTML summary
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_xml(&self.suite));
        html.push_str(
            "<style>\
             body{font-family:sans-serif;margin:2em}\
             .passed{color:#2e7d32}.failed{color:#c62828}\
             table{border-collapse:collapse}td,th{padding:4px 8px;border-bottom:1px solid #ddd}\
             pre{background:#f5f5f5;padding:8px}\
             </style>\n</head>\n<body>\n",
        );
        let _ = writeln!(html, "<h1>{}</h1>", escape_xml(&self.suite));
        let _ = writeln!(
            html,
            "<p><span class=\"passed\">{} passed</span>, <span class=\"failed\">{} failed</span> in {:.1}s</p>",
            self.passed_count(),
            self.failed_count(),
            self.duration.as_secs_f64()
        );

        for outcome in &self.scenarios {
            let class = if outcome.status.is_passed() { "passed" } else { "failed" };
            let _ = writeln!(
                html,
                "<h2 class=\"{class}\">{} {}</h2>",
                outcome.status.symbol(),
                escape_xml(&outcome.name)
            );
            html.push_str("<table>\n<tr><th>Step</th><th>Status</th><th>Duration</th></tr>\n");
            for step in &outcome.steps {
                let class = if step.status.is_passed() { "passed" } else { "failed" };
                let _ = writeln!(
                    html,
                    "<tr><td>{}</td><td class=\"{class}\">{}</td><td>{}ms</td></tr>",
                    escape_xml(&step.label),
                    step.status.symbol(),
                    step.duration.as_millis()
                );
            }
            html.push_str("</table>\n");
            if let Some(error) = &outcome.error {
                let _ = writeln!(html, "<pre>{}</pre>", escape_xml(error));
            }
            if let Some(path) = &outcome.screenshot {
                let _ = writeln!(
                    html,
                    "<img src=\"{}\" alt=\"failure screenshot\" width=\"640\">",
                    escape_xml(&path.display().to_string())
                );
            }
            if let Some(path) = &outcome.video {
                let _ = writeln!(
                    html,
                    "<video src=\"{}\" controls width=\"640\"></video>",
                    escape_xml(&path.display().to_string())
                );
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Writes JUnit, JSON and HTML reports into `dir`
    pub fn write_all(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        std::fs::write(dir.join(JUNIT_FILE), self.render_junit())?;
        std::fs::write(dir.join(JSON_FILE), self.render_json()?)?;
        std::fs::write(dir.join(HTML_FILE), self.render_html())?;
        Ok(())
    }
}

/// Step-by-step transcript used as the failure body
fn step_log(outcome: &ScenarioOutcome) -> String {
    let mut log = String::new();
    for step in &outcome.steps {
        let _ = writeln!(log, "{} {}", step.status.symbol(), step.label);
        if let Some(error) = &step.error {
            let _ = writeln!(log, "    {error}");
        }
    }
    if outcome.steps.is_empty() {
        if let Some(error) = &outcome.error {
            log.push_str(error);
        }
    }
    log
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(label: &str, status: Status, error: Option<&str>) -> StepRecord {
        StepRecord {
            label: label.to_string(),
            status,
            duration: Duration::from_millis(5),
            error: error.map(str::to_string),
        }
    }

    fn sample() -> SuiteReport {
        let mut report = SuiteReport::new("SauceDemo E2E");
        report.record(ScenarioOutcome::passed(
            "should login successfully",
            Duration::from_millis(1200),
            vec![step("Login with valid credentials", Status::Passed, None)],
        ));
        report.record(
            ScenarioOutcome::failed(
                "should add item to cart",
                Duration::from_millis(800),
                vec![
                    step("Login", Status::Passed, None),
                    step(
                        "Add <Backpack> to cart",
                        Status::Failed,
                        Some("expected cart badge count '1', but found '0'"),
                    ),
                ],
                "Step 'Add <Backpack> to cart' failed",
            )
            .with_screenshot(PathBuf::from("test-results/add-item/failure.png"))
            .with_video(PathBuf::from("test-results/add-item/3f2a.webm")),
        );
        report.duration = Duration::from_secs(2);
        report
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
        assert_eq!(
            report.scenarios[1].failed_step.as_deref(),
            Some("Add <Backpack> to cart")
        );
    }

    #[test]
    fn test_render_junit() {
        let xml = sample().render_junit();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"tests="2" failures="1""#));
        assert!(xml.contains(r#"name="should login successfully" time="1.200""#));
        assert!(xml.contains("Add &lt;Backpack&gt; to cart"));
        assert!(xml.contains(
            "<system-out>[[ATTACHMENT|test-results/add-item/failure.png]]\n\
             [[ATTACHMENT|test-results/add-item/3f2a.webm]]</system-out>"
        ));
        assert_eq!(xml.matches("<failure").count(), 1);
    }

    #[test]
    fn test_render_json() {
        let json = sample().render_json().expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["scenarios"][0]["status"], "passed");
        assert_eq!(value["scenarios"][1]["failedStep"], "Add <Backpack> to cart");
        assert_eq!(value["scenarios"][1]["durationMs"], 800);
        assert!(value["scenarios"][0].get("error").is_none());
        assert!(value["scenarios"][0].get("video").is_none());
        assert_eq!(value["scenarios"][1]["video"], "test-results/add-item/3f2a.webm");
    }

    #[test]
    fn test_render_list_and_html() {
        let report = sample();
        let list = report.render_list();
        assert!(list.contains("✓  1 should login successfully"));
        assert!(list.contains("step: Add <Backpack> to cart"));
        assert!(list.contains("1 passed, 1 failed"));
        assert!(list.contains("video: test-results/add-item/3f2a.webm"));

        let html = report.render_html();
        assert!(html.contains("<h2 class=\"failed\">✘ should add item to cart</h2>"));
        assert!(!html.contains("<Backpack>"));
        assert!(html.contains("<video src=\"test-results/add-item/3f2a.webm\""));
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().expect("temp dir");
        sample().write_all(dir.path()).expect("reports written");
        for file in [JUNIT_FILE, JSON_FILE, HTML_FILE] {
            assert!(dir.path().join(file).is_file(), "{file} missing");
        }
    }
}
