//! saucedemo-e2e: Page-object end-to-end suite for the SauceDemo purchase workflow
//!
//! Each application screen is a page model composed from a small set of
//! wait/action/assertion primitives. Scenarios sequence page-model
//! operations into named steps and a runner executes them one at a time,
//! each in a fresh browser session driven by playwright-rs.
//!
//! # Examples
//!
//! ## Running the suite
//!
//! ```ignore
//! use saucedemo_e2e::{PlaywrightSessions, SessionFactory, SuiteConfig, SuiteRunner, scenarios};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SuiteConfig::load(None)?;
//!     let sessions = PlaywrightSessions::launch(&config.browser, &config.timeouts).await?;
//!
//!     let suite = scenarios::all();
//!     let selected = saucedemo_e2e::select(&suite, None);
//!     let report = SuiteRunner::new(&config, &sessions).run(&selected).await;
//!
//!     print!("{}", report.render_list());
//!     report.write_all(&config.output_dir)?;
//!     sessions.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Driving page models directly
//!
//! ```ignore
//! use saucedemo_e2e::{Pages, PageModel, SessionFactory};
//!
//! let driver = sessions.open(std::path::Path::new("test-results/manual")).await?;
//! let pages = Pages::new(driver, &config);
//!
//! pages.login.navigate().await?;
//! pages.login.login_with_valid_credentials().await?;
//! pages.products.verify_loaded().await?;
//! pages.products.add_sauce_labs_backpack_to_cart().await?;
//! assert_eq!(pages.products.get_cart_item_count().await?, 1);
//! ```

pub mod base_page;
pub mod config;
pub mod customer;
pub mod driver;
mod error;
pub mod locator;
pub mod pages;
pub mod reference;
pub mod report;
pub mod scenario;
pub mod scenarios;

pub use base_page::{BasePage, UrlMatch};
pub use config::{BrowserSettings, SuiteConfig, Timeouts};
pub use customer::CustomerData;
pub use driver::{Driver, PlaywrightDriver, PlaywrightSessions, SessionFactory};
pub use error::{Error, Result};
pub use locator::Locator;
pub use pages::{PageModel, Pages};
pub use reference::{Credentials, ReferenceData};
pub use report::{ScenarioOutcome, Status, SuiteReport};
pub use scenario::{Scenario, ScenarioContext, StepRecorder, SuiteRunner, select};
