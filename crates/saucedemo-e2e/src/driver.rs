// Driver - Browser capability consumed by the page primitives
//
// The page layer never talks to playwright-rs directly. It sees a `Driver`:
// one live page of one isolated browser session. `PlaywrightDriver` is the
// production implementation; tests plug in an in-memory one.
//
// Sessions are opened by a `SessionFactory`. `PlaywrightSessions` launches the
// browser once per run and hands out a fresh context + page per scenario.

use crate::config::{BrowserSettings, Timeouts};
use crate::error::{Error, Result};
use crate::locator::Locator;
use async_trait::async_trait;
use playwright_rs::{
    Browser, BrowserContext, BrowserContextOptions, ClickOptions, FillOptions, GotoOptions,
    LaunchOptions, Page, Playwright, RecordVideo, WaitUntil,
};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Operations the suite needs from a browser page
///
/// Queries (`count`, `is_visible`, `is_enabled`, `text_content`) answer
/// immediately for the current DOM; callers do their own waiting. Actions
/// (`click`, `fill`, `clear`) may wait up to `timeout` inside the engine.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Navigates the page to `url` and waits for the network to settle
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()>;

    /// URL currently displayed
    async fn current_url(&self) -> Result<String>;

    /// Number of elements matching `locator`
    async fn count(&self, locator: &Locator) -> Result<usize>;

    /// Whether the element is attached and rendered
    async fn is_visible(&self, locator: &Locator) -> Result<bool>;

    /// Whether the element accepts user input
    async fn is_enabled(&self, locator: &Locator) -> Result<bool>;

    async fn click(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Replaces the value of an input with `text`
    async fn fill(&self, locator: &Locator, text: &str, timeout: Duration) -> Result<()>;

    async fn clear(&self, locator: &Locator, timeout: Duration) -> Result<()>;

    /// Text content of the element, `None` when the node carries none
    async fn text_content(&self, locator: &Locator) -> Result<Option<String>>;

    /// Current value of an input element
    async fn input_value(&self, locator: &Locator) -> Result<String>;

    /// Waits until the document is loaded and no request started for `quiet`
    async fn wait_for_network_idle(&self, quiet: Duration, timeout: Duration) -> Result<()>;

    /// Saves a PNG of the viewport to `path`
    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Closes the page and its session
    async fn close(&self) -> Result<()>;
}

/// Opens isolated browser sessions, one per scenario
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Opens a session whose artefacts (video recordings) go to `artifact_dir`
    ///
    /// Recordings are complete once the driver is closed.
    async fn open(&self, artifact_dir: &Path) -> Result<Arc<dyn Driver>>;

    /// Releases everything the factory launched
    async fn shutdown(&self) -> Result<()>;
}

/// `Driver` over one playwright-rs page
pub struct PlaywrightDriver {
    context: BrowserContext,
    page: Page,
    poll_interval: Duration,
}

impl PlaywrightDriver {
    pub fn new(context: BrowserContext, page: Page, poll_interval: Duration) -> Self {
        Self {
            context,
            page,
            poll_interval,
        }
    }

    async fn resolve(&self, locator: &Locator) -> playwright_rs::Locator {
        self.page.locator(&locator.selector()).await
    }
}

/// Milliseconds as the engine expects them
fn millis(timeout: Duration) -> f64 {
    timeout.as_millis() as f64
}

/// Snapshot of `document.readyState` and the number of resource entries
const LOAD_STATE_SCRIPT: &str =
    "document.readyState + ':' + performance.getEntriesByType('resource').length";

fn parse_load_state(raw: &str) -> Option<(bool, usize)> {
    let (state, resources) = raw.split_once(':')?;
    Some((state == "complete", resources.trim().parse().ok()?))
}

#[async_trait]
impl Driver for PlaywrightDriver {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
        debug!(url, "goto");
        let options = GotoOptions::new()
            .timeout(timeout)
            .wait_until(WaitUntil::NetworkIdle);
        self.page
            .goto(url, Some(options))
            .await
            .map_err(|e| Error::Navigation {
                url: url.to_string(),
                source: Box::new(Error::Engine(e)),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page.url())
    }

    async fn count(&self, locator: &Locator) -> Result<usize> {
        Ok(self.resolve(locator).await.count().await?)
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        Ok(self.resolve(locator).await.is_visible().await?)
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool> {
        Ok(self.resolve(locator).await.is_enabled().await?)
    }

    async fn click(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let options = ClickOptions::builder().timeout(millis(timeout)).build();
        Ok(self.resolve(locator).await.click(Some(options)).await?)
    }

    async fn fill(&self, locator: &Locator, text: &str, timeout: Duration) -> Result<()> {
        let options = FillOptions::builder().timeout(millis(timeout)).build();
        Ok(self.resolve(locator).await.fill(text, Some(options)).await?)
    }

    async fn clear(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let options = FillOptions::builder().timeout(millis(timeout)).build();
        Ok(self.resolve(locator).await.clear(Some(options)).await?)
    }

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>> {
        Ok(self.resolve(locator).await.text_content().await?)
    }

    async fn input_value(&self, locator: &Locator) -> Result<String> {
        Ok(self.resolve(locator).await.input_value(None).await?)
    }

    async fn wait_for_network_idle(&self, quiet: Duration, timeout: Duration) -> Result<()> {
        // The binding has no load-state wait, so poll the page: loaded once the
        // document is complete and the resource count holds still for `quiet`.
        let start = Instant::now();
        let mut last: Option<(usize, Instant)> = None;

        loop {
            let raw = self.page.evaluate_value(LOAD_STATE_SCRIPT).await?;
            if let Some((complete, resources)) = parse_load_state(&raw) {
                match last {
                    Some((seen, since)) if complete && seen == resources => {
                        if since.elapsed() >= quiet {
                            return Ok(());
                        }
                    }
                    _ => last = Some((resources, Instant::now())),
                }
            }

            if start.elapsed() >= timeout {
                return Err(Error::Timeout {
                    condition: "network idle".to_string(),
                    locator: self.page.url(),
                    timeout,
                });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.page.screenshot_to_file(path, None).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.page.close().await?;
        self.context.close().await?;
        Ok(())
    }
}

/// One launched browser handing out isolated sessions
pub struct PlaywrightSessions {
    playwright: Playwright,
    browser: Browser,
    settings: BrowserSettings,
    timeouts: Timeouts,
}

impl PlaywrightSessions {
    /// Starts the Playwright server and launches Chromium
    pub async fn launch(settings: &BrowserSettings, timeouts: &Timeouts) -> Result<Self> {
        let playwright = Playwright::launch()
            .await
            .map_err(|e| Error::Engine(e).context("starting Playwright"))?;

        let options = LaunchOptions::new()
            .headless(settings.headless)
            .args(settings.launch_args());
        let browser = playwright
            .chromium()
            .launch_with_options(options)
            .await
            .map_err(|e| Error::Engine(e).context("launching Chromium"))?;

        debug!(headless = settings.headless, "browser launched");

        Ok(Self {
            playwright,
            browser,
            settings: settings.clone(),
            timeouts: *timeouts,
        })
    }
}

#[async_trait]
impl SessionFactory for PlaywrightSessions {
    async fn open(&self, artifact_dir: &Path) -> Result<Arc<dyn Driver>> {
        let mut options = BrowserContextOptions::builder();
        // A maximized window only helps if the page is not pinned to a viewport
        if self.settings.maximized {
            options = options.no_viewport(true);
        }
        if self.settings.record_video {
            // The driver process resolves relative paths against its own cwd
            let dir = std::path::absolute(artifact_dir)?;
            options = options.record_video(RecordVideo {
                dir: dir.display().to_string(),
                size: None,
            });
        }
        let context = self.browser.new_context_with_options(options.build()).await?;
        let page = context.new_page().await?;

        Ok(Arc::new(PlaywrightDriver::new(
            context,
            page,
            self.timeouts.poll_interval,
        )))
    }

    async fn shutdown(&self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_load_state() {
        assert_eq!(parse_load_state("complete:17"), Some((true, 17)));
        assert_eq!(parse_load_state("interactive:3"), Some((false, 3)));
        assert_eq!(parse_load_state("undefined"), None);
        assert_eq!(parse_load_state("complete:NaN"), None);
    }

    #[test]
    fn test_millis() {
        assert_eq!(millis(Duration::from_secs(30)), 30_000.0);
    }
}
