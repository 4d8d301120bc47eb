// Base page - Wait, action and assertion primitives shared by every page model
//
// All element access from the page layer goes through here so that waiting
// policy lives in one place: nothing is clicked, filled or read before it is
// visible (and, for clicks, enabled).
//
// Waits poll the driver like Playwright's web-first assertions do: check,
// return on success, fail with a descriptive error once the budget is spent,
// otherwise sleep one poll interval.
//
// See: https://playwright.dev/docs/test-assertions

use crate::config::Timeouts;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::locator::Locator;
use regex::Regex;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Expected value of the current URL
#[derive(Debug, Clone)]
pub enum UrlMatch {
    /// The URL must equal this string
    Exact(String),
    /// The URL must match this regular expression somewhere
    Pattern(Regex),
}

impl UrlMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            UrlMatch::Exact(expected) => expected == actual,
            UrlMatch::Pattern(re) => re.is_match(actual),
        }
    }
}

impl fmt::Display for UrlMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlMatch::Exact(url) => f.write_str(url),
            UrlMatch::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&Url> for UrlMatch {
    fn from(url: &Url) -> Self {
        UrlMatch::Exact(url.to_string())
    }
}

impl From<&str> for UrlMatch {
    fn from(url: &str) -> Self {
        UrlMatch::Exact(url.to_string())
    }
}

impl From<Regex> for UrlMatch {
    fn from(re: Regex) -> Self {
        UrlMatch::Pattern(re)
    }
}

/// Collapses whitespace runs the way rendered text reads
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Primitive operations over one live page
///
/// Cheap to clone; every page model of a scenario holds a clone bound to the
/// same session.
#[derive(Clone)]
pub struct BasePage {
    driver: Arc<dyn Driver>,
    timeouts: Timeouts,
}

impl BasePage {
    pub fn new(driver: Arc<dyn Driver>, timeouts: Timeouts) -> Self {
        Self { driver, timeouts }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Polls `check` until it yields true or `timeout` elapses.
    ///
    /// Returns `Ok(false)` on timeout; engine errors abort the wait.
    async fn eventually<F, Fut>(&self, timeout: Duration, mut check: F) -> Result<bool>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let start = Instant::now();
        loop {
            if check().await? {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            tokio::time::sleep(self.timeouts.poll_interval).await;
        }
    }

    /// Navigates to `url`; failures end the scenario.
    pub async fn navigate(&self, url: &Url) -> Result<()> {
        debug!(%url, "navigate");
        self.driver.goto(url.as_str(), self.timeouts.navigation).await
    }

    /// Waits for the element to become visible within the element timeout.
    pub async fn wait_visible(&self, locator: &Locator) -> Result<()> {
        self.wait_visible_for(locator, self.timeouts.element).await
    }

    /// Waits for the element to become visible within `timeout`.
    pub async fn wait_visible_for(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        debug!(%locator, "wait visible");
        if self
            .eventually(timeout, || self.driver.is_visible(locator))
            .await?
        {
            Ok(())
        } else {
            Err(Error::Timeout {
                condition: "visible".to_string(),
                locator: locator.to_string(),
                timeout,
            })
        }
    }

    /// Waits for the element to be visible, then requires it to be enabled.
    pub async fn wait_clickable(&self, locator: &Locator) -> Result<()> {
        self.wait_visible(locator).await?;
        if self
            .eventually(self.timeouts.element, || self.driver.is_enabled(locator))
            .await?
        {
            Ok(())
        } else {
            Err(Error::Assertion(format!(
                "expected {locator} to be enabled, but it stayed disabled for {:?}",
                self.timeouts.element
            )))
        }
    }

    /// Clicks the element once it is clickable.
    ///
    /// Whatever the click triggers is left for the caller to verify.
    pub async fn click(&self, locator: &Locator) -> Result<()> {
        self.wait_clickable(locator).await?;
        debug!(%locator, "click");
        self.driver.click(locator, self.timeouts.action).await
    }

    /// Replaces the content of an input, then waits for the settle delay.
    pub async fn fill(&self, locator: &Locator, text: &str) -> Result<()> {
        self.fill_with(locator, text, true).await
    }

    /// Replaces the content of an input, optionally skipping the settle delay.
    ///
    /// The settle delay keeps the next action from racing the application's
    /// client-side validation and re-render.
    pub async fn fill_with(&self, locator: &Locator, text: &str, settle: bool) -> Result<()> {
        self.wait_visible(locator).await?;
        debug!(%locator, len = text.len(), "fill");
        self.driver.clear(locator, self.timeouts.action).await?;
        self.driver.fill(locator, text, self.timeouts.action).await?;
        if settle && !self.timeouts.settle.is_zero() {
            tokio::time::sleep(self.timeouts.settle).await;
        }
        Ok(())
    }

    /// Empties an input without typing anything back.
    pub async fn clear(&self, locator: &Locator) -> Result<()> {
        self.wait_visible(locator).await?;
        debug!(%locator, "clear");
        self.driver.clear(locator, self.timeouts.action).await
    }

    /// Text content of a visible element, empty when it has none.
    pub async fn read_text(&self, locator: &Locator) -> Result<String> {
        self.wait_visible(locator).await?;
        Ok(self.driver.text_content(locator).await?.unwrap_or_default())
    }

    /// Current value of a visible input.
    pub async fn read_value(&self, locator: &Locator) -> Result<String> {
        self.wait_visible(locator).await?;
        self.driver.input_value(locator).await
    }

    /// Number of matching elements right now, without waiting.
    pub async fn count(&self, locator: &Locator) -> Result<usize> {
        self.driver.count(locator).await
    }

    /// Whether the element is visible right now, without waiting.
    pub async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        self.driver.is_visible(locator).await
    }

    /// Asserts the element becomes visible within the assertion timeout.
    pub async fn assert_visible(&self, locator: &Locator) -> Result<()> {
        if self
            .eventually(self.timeouts.assertion, || self.driver.is_visible(locator))
            .await?
        {
            Ok(())
        } else {
            Err(Error::Assertion(format!(
                "expected {locator} to be visible, but it was not visible after {:?}",
                self.timeouts.assertion
            )))
        }
    }

    /// Asserts the element is absent or hidden within the assertion timeout.
    pub async fn assert_hidden(&self, locator: &Locator) -> Result<()> {
        if self
            .eventually(self.timeouts.assertion, || {
                let driver = &self.driver;
                async move { Ok::<_, Error>(!driver.is_visible(locator).await?) }
            })
            .await?
        {
            Ok(())
        } else {
            Err(Error::Assertion(format!(
                "expected {locator} NOT to be visible, but it was visible after {:?}",
                self.timeouts.assertion
            )))
        }
    }

    /// Asserts the element's text equals `expected`, ignoring whitespace runs.
    pub async fn assert_text(&self, locator: &Locator, expected: &str) -> Result<()> {
        self.assert_text_by(locator, expected, |actual, expected| actual == expected)
            .await
    }

    /// Asserts the element's text contains `expected`.
    pub async fn assert_contains_text(&self, locator: &Locator, expected: &str) -> Result<()> {
        self.assert_text_by(locator, expected, |actual, expected| {
            actual.contains(expected)
        })
        .await
    }

    async fn assert_text_by(
        &self,
        locator: &Locator,
        expected: &str,
        accept: impl Fn(&str, &str) -> bool,
    ) -> Result<()> {
        let expected = normalize(expected);
        let start = Instant::now();
        let mut actual = None;

        loop {
            if self.driver.is_visible(locator).await? {
                let text = self.driver.text_content(locator).await?.unwrap_or_default();
                let text = normalize(&text);
                if accept(&text, &expected) {
                    return Ok(());
                }
                actual = Some(text);
            }

            if start.elapsed() >= self.timeouts.assertion {
                return Err(match actual {
                    Some(actual) => Error::mismatch(&format!("text of {locator}"), expected, actual),
                    None => Error::Assertion(format!(
                        "expected {locator} with text '{expected}', but the element was never visible"
                    )),
                });
            }

            tokio::time::sleep(self.timeouts.poll_interval).await;
        }
    }

    /// Asserts the current URL matches within the assertion timeout.
    pub async fn assert_url(&self, expected: impl Into<UrlMatch>) -> Result<()> {
        let expected = expected.into();
        let start = Instant::now();
        loop {
            let actual = self.driver.current_url().await?;
            if expected.matches(&actual) {
                return Ok(());
            }
            if start.elapsed() >= self.timeouts.assertion {
                return Err(Error::mismatch("URL", &expected, actual));
            }
            tokio::time::sleep(self.timeouts.poll_interval).await;
        }
    }

    /// Asserts exactly `expected` elements match, reading the count once.
    pub async fn assert_count(&self, locator: &Locator, expected: usize) -> Result<()> {
        let actual = self.driver.count(locator).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(Error::mismatch(&format!("number of {locator}"), expected, actual))
        }
    }

    /// Waits until the page reports no in-flight network activity.
    pub async fn wait_loaded(&self) -> Result<()> {
        debug!("wait for network idle");
        self.driver
            .wait_for_network_idle(self.timeouts.network_quiet, self.timeouts.navigation)
            .await
    }
}
