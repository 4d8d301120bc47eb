// Cart screen

use crate::base_page::BasePage;
use crate::error::{Error, Result};
use crate::locator::{Locator, slug};
use crate::pages::{PageModel, page_title};
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CartPage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    page_title: Locator,
    cart_items: Locator,
    checkout_button: Locator,
    continue_shopping_button: Locator,
    cart_list: Locator,
}

impl CartPage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            page_title: page_title(),
            cart_items: Locator::css(".cart_item"),
            checkout_button: Locator::data_test("checkout"),
            continue_shopping_button: Locator::data_test("continue-shopping"),
            cart_list: Locator::css(".cart_list"),
        }
    }

    fn product(&self, name: &str) -> Locator {
        self.cart_items.clone().has_text(name)
    }

    pub async fn verify_cart_page_loaded(&self) -> Result<()> {
        self.verify_loaded().await
    }

    pub async fn verify_product_in_cart(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.product(name)).await
    }

    pub async fn verify_sauce_labs_backpack_in_cart(&self) -> Result<()> {
        self.verify_product_in_cart(&self.reference.product).await
    }

    /// Number of line items listed, read once
    pub async fn get_cart_item_count(&self) -> Result<usize> {
        self.base.count(&self.cart_items).await
    }

    pub async fn verify_cart_item_count(&self, expected: usize) -> Result<()> {
        let actual = self.get_cart_item_count().await?;
        if actual != expected {
            return Err(Error::Assertion(format!(
                "expected {expected} items in cart, but found {actual}"
            )));
        }
        Ok(())
    }

    pub async fn click_checkout(&self) -> Result<()> {
        self.base.assert_visible(&self.checkout_button).await?;
        self.base.click(&self.checkout_button).await
    }

    pub async fn click_continue_shopping(&self) -> Result<()> {
        self.base.assert_visible(&self.continue_shopping_button).await?;
        self.base.click(&self.continue_shopping_button).await
    }

    pub async fn verify_checkout_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.checkout_button).await
    }

    pub async fn verify_continue_shopping_button_visible(&self) -> Result<()> {
        self.base.assert_visible(&self.continue_shopping_button).await
    }

    pub async fn remove_product_from_cart(&self, name: &str) -> Result<()> {
        let remove = self
            .product(name)
            .locator(&Locator::data_test(&format!("remove-{}", slug(name))));
        self.base.click(&remove).await
    }

    pub async fn remove_sauce_labs_backpack_from_cart(&self) -> Result<()> {
        self.remove_product_from_cart(&self.reference.product).await
    }

    /// Asserts no line item mentions `name`, read once
    pub async fn verify_product_removed_from_cart(&self, name: &str) -> Result<()> {
        let remaining = self.base.count(&self.product(name)).await?;
        if remaining > 0 {
            return Err(Error::Assertion(format!(
                "expected product \"{name}\" to be removed from cart, but found {remaining} line item(s)"
            )));
        }
        Ok(())
    }

    pub async fn verify_sauce_labs_backpack_removed_from_cart(&self) -> Result<()> {
        self.verify_product_removed_from_cart(&self.reference.product)
            .await
    }
}

#[async_trait]
impl PageModel for CartPage {
    fn name(&self) -> &'static str {
        "Cart"
    }

    async fn verify_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, &self.reference.titles.cart)
            .await?;
        self.base.assert_url(&self.reference.urls.cart).await?;
        for locator in [
            &self.cart_list,
            &self.checkout_button,
            &self.continue_shopping_button,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}
