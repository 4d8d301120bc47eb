// Checkout step two - Order overview
//
// Amounts are returned as the displayed strings minus their label; callers
// decide whether and how to compare them numerically.

use crate::base_page::BasePage;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::pages::{PageModel, page_title, strip_amount_label};
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;

pub const SUBTOTAL_LABEL: &str = "Item total: $";
pub const TAX_LABEL: &str = "Tax: $";
pub const TOTAL_LABEL: &str = "Total: $";

pub struct CheckoutStepTwoPage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    page_title: Locator,
    order_summary: Locator,
    finish_button: Locator,
    cancel_button: Locator,
    order_items: Locator,
    subtotal_label: Locator,
    tax_label: Locator,
    total_label: Locator,
}

impl CheckoutStepTwoPage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            page_title: page_title(),
            order_summary: Locator::css(".summary_info"),
            finish_button: Locator::data_test("finish"),
            cancel_button: Locator::data_test("cancel"),
            order_items: Locator::css(".cart_item"),
            subtotal_label: Locator::css(".summary_subtotal_label"),
            tax_label: Locator::css(".summary_tax_label"),
            total_label: Locator::css(".summary_total_label"),
        }
    }

    pub async fn verify_page_loaded(&self) -> Result<()> {
        self.verify_loaded().await
    }

    pub async fn verify_product_in_order_summary(&self, name: &str) -> Result<()> {
        let item = self.order_items.clone().has_text(name);
        self.base.assert_visible(&item).await
    }

    pub async fn verify_sauce_labs_backpack_in_order_summary(&self) -> Result<()> {
        self.verify_product_in_order_summary(&self.reference.product)
            .await
    }

    pub async fn get_order_item_count(&self) -> Result<usize> {
        self.base.count(&self.order_items).await
    }

    pub async fn verify_order_item_count(&self, expected: usize) -> Result<()> {
        let actual = self.get_order_item_count().await?;
        if actual != expected {
            return Err(Error::Assertion(format!(
                "expected {expected} items in order, but found {actual}"
            )));
        }
        Ok(())
    }

    pub async fn click_finish(&self) -> Result<()> {
        self.base.assert_visible(&self.finish_button).await?;
        self.base.click(&self.finish_button).await
    }

    pub async fn click_cancel(&self) -> Result<()> {
        self.base.assert_visible(&self.cancel_button).await?;
        self.base.click(&self.cancel_button).await
    }

    pub async fn verify_finish_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.finish_button).await
    }

    pub async fn verify_cancel_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.cancel_button).await
    }

    /// Asserts subtotal, tax and total lines are all shown
    pub async fn verify_order_summary_complete(&self) -> Result<()> {
        for locator in [&self.subtotal_label, &self.tax_label, &self.total_label] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }

    async fn amount(&self, locator: &Locator, label: &str) -> Result<String> {
        let text = self.base.read_text(locator).await?;
        Ok(strip_amount_label(&text, label))
    }

    pub async fn subtotal_amount(&self) -> Result<String> {
        self.amount(&self.subtotal_label, SUBTOTAL_LABEL).await
    }

    pub async fn tax_amount(&self) -> Result<String> {
        self.amount(&self.tax_label, TAX_LABEL).await
    }

    pub async fn total_amount(&self) -> Result<String> {
        self.amount(&self.total_label, TOTAL_LABEL).await
    }
}

#[async_trait]
impl PageModel for CheckoutStepTwoPage {
    fn name(&self) -> &'static str {
        "Checkout: Overview"
    }

    async fn verify_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, &self.reference.titles.checkout_step_two)
            .await?;
        self.base
            .assert_url(&self.reference.urls.checkout_step_two)
            .await?;
        for locator in [
            &self.order_summary,
            &self.finish_button,
            &self.cancel_button,
            &self.subtotal_label,
            &self.tax_label,
            &self.total_label,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}
