// Reference data - Fixed facts about the application under test
//
// URLs, credential pairs, exact user-visible strings and the single product
// the suite exercises. Built once at startup (see `SuiteConfig`) and handed
// to pages and scenarios by reference.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default application entry point
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// The product every purchase scenario buys
pub const SAUCE_LABS_BACKPACK: &str = "Sauce Labs Backpack";

/// A username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Absolute URL of every screen, derived from one base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Urls {
    pub base: Url,
    pub inventory: Url,
    pub cart: Url,
    pub checkout_step_one: Url,
    pub checkout_step_two: Url,
    pub checkout_complete: Url,
}

impl Urls {
    /// Derives the per-screen URLs by joining fixed paths onto `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://host/app` and `https://host/app/` resolve identically.
    pub fn from_base(base: &str) -> Result<Self> {
        let mut normalized = base.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| Error::Config(format!("invalid base URL '{base}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base URL must be http(s), got '{}'",
                base.scheme()
            )));
        }

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| Error::Config(format!("cannot derive '{path}' from '{base}': {e}")))
        };

        Ok(Self {
            inventory: join("inventory.html")?,
            cart: join("cart.html")?,
            checkout_step_one: join("checkout-step-one.html")?,
            checkout_step_two: join("checkout-step-two.html")?,
            checkout_complete: join("checkout-complete.html")?,
            base,
        })
    }
}

/// Exact strings the application renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub invalid_credentials: String,
    pub missing_username: String,
    pub missing_first_name: String,
    pub order_complete_header: String,
    pub order_dispatched: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_credentials:
                "Epic sadface: Username and password do not match any user in this service"
                    .to_string(),
            missing_username: "Epic sadface: Username is required".to_string(),
            missing_first_name: "Error: First Name is required".to_string(),
            order_complete_header: "Thank you for your order!".to_string(),
            order_dispatched: "Your order has been dispatched, and will arrive just as fast as \
                               the pony can get there!"
                .to_string(),
        }
    }
}

/// Title text shown in the secondary header of each screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Titles {
    pub products: String,
    pub cart: String,
    pub checkout_step_one: String,
    pub checkout_step_two: String,
    pub checkout_complete: String,
}

impl Default for Titles {
    fn default() -> Self {
        Self {
            products: "Products".to_string(),
            cart: "Your Cart".to_string(),
            checkout_step_one: "Checkout: Your Information".to_string(),
            checkout_step_two: "Checkout: Overview".to_string(),
            checkout_complete: "Checkout: Complete!".to_string(),
        }
    }
}

/// Immutable set of reference constants for one suite run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub urls: Urls,
    pub valid_user: Credentials,
    pub invalid_user: Credentials,
    pub product: String,
    pub messages: Messages,
    pub titles: Titles,
}

impl ReferenceData {
    /// Reference data for an application served from `base_url`
    pub fn for_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            urls: Urls::from_base(base_url)?,
            valid_user: Credentials::new("standard_user", "secret_sauce"),
            invalid_user: Credentials::new("invalid_user", "invalid_password"),
            product: SAUCE_LABS_BACKPACK.to_string(),
            messages: Messages::default(),
            titles: Titles::default(),
        })
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        // DEFAULT_BASE_URL is a valid https URL, so derivation cannot fail.
        match Self::for_base_url(DEFAULT_BASE_URL) {
            Ok(data) => data,
            Err(e) => unreachable!("default base URL rejected: {e}"),
        }
    }
}
