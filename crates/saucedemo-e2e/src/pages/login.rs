// Login screen

use crate::base_page::BasePage;
use crate::error::Result;
use crate::locator::Locator;
use crate::pages::PageModel;
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct LoginPage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    username_input: Locator,
    password_input: Locator,
    login_button: Locator,
    error_message: Locator,
    login_logo: Locator,
}

impl LoginPage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            username_input: Locator::data_test("username"),
            password_input: Locator::data_test("password"),
            login_button: Locator::data_test("login-button"),
            error_message: Locator::data_test("error"),
            login_logo: Locator::css(".login_logo"),
        }
    }

    /// Opens the login screen and waits for the network to go quiet
    pub async fn navigate(&self) -> Result<()> {
        self.base.navigate(&self.reference.urls.base).await?;
        self.base.wait_loaded().await
    }

    pub async fn enter_username(&self, username: &str) -> Result<()> {
        self.base.fill(&self.username_input, username).await
    }

    pub async fn enter_password(&self, password: &str) -> Result<()> {
        self.base.fill(&self.password_input, password).await
    }

    pub async fn click_login_button(&self) -> Result<()> {
        self.base.click(&self.login_button).await
    }

    /// Types both credentials and submits the form
    ///
    /// Does not check the outcome; follow with `verify_successful_login` or
    /// `verify_error_message`.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        debug!(username, "login");
        self.enter_username(username).await?;
        self.enter_password(password).await?;
        self.click_login_button().await
    }

    pub async fn login_with_valid_credentials(&self) -> Result<()> {
        let user = &self.reference.valid_user;
        self.login(&user.username, &user.password).await
    }

    /// Asserts the error banner shows exactly `expected`
    pub async fn verify_error_message(&self, expected: &str) -> Result<()> {
        self.base.assert_visible(&self.error_message).await?;
        self.base.assert_text(&self.error_message, expected).await
    }

    /// Asserts the session landed on the product catalog
    pub async fn verify_successful_login(&self) -> Result<()> {
        self.base.assert_url(&self.reference.urls.inventory).await
    }
}

#[async_trait]
impl PageModel for LoginPage {
    fn name(&self) -> &'static str {
        "Login"
    }

    async fn verify_loaded(&self) -> Result<()> {
        for locator in [
            &self.login_logo,
            &self.username_input,
            &self.password_input,
            &self.login_button,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}
