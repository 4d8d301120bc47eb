// Checkout complete - Order confirmation

use crate::base_page::BasePage;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::pages::{PageModel, page_title};
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CheckoutCompletePage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    page_title: Locator,
    complete_header: Locator,
    complete_text: Locator,
    pony_express_image: Locator,
    back_home_button: Locator,
}

impl CheckoutCompletePage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            page_title: page_title(),
            complete_header: Locator::css(".complete-header"),
            complete_text: Locator::css(".complete-text"),
            pony_express_image: Locator::css(".pony_express"),
            back_home_button: Locator::data_test("back-to-products"),
        }
    }

    pub async fn verify_page_loaded(&self) -> Result<()> {
        self.verify_loaded().await
    }

    /// Asserts the header reads "Thank you for your order!"
    pub async fn verify_order_complete_message(&self) -> Result<()> {
        self.base.assert_visible(&self.complete_header).await?;
        self.base
            .assert_text(
                &self.complete_header,
                &self.reference.messages.order_complete_header,
            )
            .await
    }

    /// Asserts the body text is the dispatch message
    pub async fn verify_thank_you_message(&self) -> Result<()> {
        self.base.assert_visible(&self.complete_text).await?;
        self.base
            .assert_text(&self.complete_text, &self.reference.messages.order_dispatched)
            .await
    }

    pub async fn click_back_home(&self) -> Result<()> {
        self.base.assert_visible(&self.back_home_button).await?;
        self.base.click(&self.back_home_button).await
    }

    /// Screen check plus both confirmation messages
    pub async fn verify_complete_order_success(&self) -> Result<()> {
        self.verify_loaded().await?;
        self.verify_order_complete_message().await?;
        self.verify_thank_you_message().await
    }

    /// Asserts the body text contains `expected`, read once
    pub async fn verify_success_message(&self, expected: &str) -> Result<()> {
        let actual = self.base.read_text(&self.complete_text).await?;
        if !actual.contains(expected) {
            return Err(Error::Assertion(format!(
                "expected message to contain \"{expected}\" but got \"{actual}\""
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PageModel for CheckoutCompletePage {
    fn name(&self) -> &'static str {
        "Checkout: Complete!"
    }

    async fn verify_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, &self.reference.titles.checkout_complete)
            .await?;
        self.base
            .assert_url(&self.reference.urls.checkout_complete)
            .await?;
        for locator in [
            &self.complete_header,
            &self.complete_text,
            &self.pony_express_image,
            &self.back_home_button,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}
