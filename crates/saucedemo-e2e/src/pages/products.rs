// Products screen - The inventory catalog
//
// Per-product controls are found by scoping: the `.inventory_item` card that
// contains the product name, then the add/remove button inside that card.

use crate::base_page::BasePage;
use crate::error::{Error, Result};
use crate::locator::{Locator, slug};
use crate::pages::{PageModel, page_title};
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct ProductsPage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    page_title: Locator,
    shopping_cart_link: Locator,
    shopping_cart_badge: Locator,
    inventory_container: Locator,
    inventory_item: Locator,
    menu_button: Locator,
    sort_dropdown: Locator,
}

impl ProductsPage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            page_title: page_title(),
            shopping_cart_link: Locator::css(".shopping_cart_link"),
            shopping_cart_badge: Locator::css(".shopping_cart_badge"),
            inventory_container: Locator::css(".inventory_container"),
            inventory_item: Locator::css(".inventory_item"),
            menu_button: Locator::css("#react-burger-menu-btn"),
            sort_dropdown: Locator::css(".product_sort_container"),
        }
    }

    fn product(&self, name: &str) -> Locator {
        self.inventory_item.clone().has_text(name)
    }

    fn add_to_cart_button(&self, name: &str) -> Locator {
        self.product(name)
            .locator(&Locator::data_test(&format!("add-to-cart-{}", slug(name))))
    }

    fn remove_button(&self, name: &str) -> Locator {
        self.product(name)
            .locator(&Locator::data_test(&format!("remove-{}", slug(name))))
    }

    pub async fn verify_products_page_loaded(&self) -> Result<()> {
        self.verify_loaded().await
    }

    pub async fn click_shopping_cart(&self) -> Result<()> {
        self.base.click(&self.shopping_cart_link).await
    }

    pub async fn add_product_to_cart(&self, name: &str) -> Result<()> {
        debug!(product = name, "add to cart");
        self.base.click(&self.add_to_cart_button(name)).await
    }

    pub async fn add_sauce_labs_backpack_to_cart(&self) -> Result<()> {
        self.add_product_to_cart(&self.reference.product).await
    }

    pub async fn remove_product_from_cart(&self, name: &str) -> Result<()> {
        debug!(product = name, "remove from cart");
        self.base.click(&self.remove_button(name)).await
    }

    pub async fn remove_sauce_labs_backpack_from_cart(&self) -> Result<()> {
        self.remove_product_from_cart(&self.reference.product).await
    }

    /// Number shown on the cart badge
    ///
    /// The badge only exists while the cart holds something, so a badge that
    /// does not show up within the element timeout reads as zero. The badge
    /// renders after the click that fills the cart, hence the wait.
    pub async fn get_cart_item_count(&self) -> Result<usize> {
        match self.base.wait_visible(&self.shopping_cart_badge).await {
            Ok(()) => {}
            Err(e) if e.is_timeout() => return Ok(0),
            Err(e) => return Err(e),
        }
        let text = self.base.read_text(&self.shopping_cart_badge).await?;
        Ok(text.trim().parse().unwrap_or(0))
    }

    /// Asserts the badge shows `expected`, or that there is no badge for zero
    pub async fn verify_cart_item_count(&self, expected: usize) -> Result<()> {
        if expected == 0 {
            return match self.base.assert_hidden(&self.shopping_cart_badge).await {
                Err(e) if e.is_assertion() => {
                    let shown = self.get_cart_item_count().await?;
                    Err(Error::mismatch("cart badge count", 0, shown))
                }
                other => other,
            };
        }
        self.base.assert_visible(&self.shopping_cart_badge).await?;
        self.base
            .assert_text(&self.shopping_cart_badge, &expected.to_string())
            .await
    }

    pub async fn verify_product_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.product(name)).await
    }

    pub async fn verify_add_to_cart_button_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.add_to_cart_button(name)).await
    }

    pub async fn verify_remove_button_visible(&self, name: &str) -> Result<()> {
        self.base.assert_visible(&self.remove_button(name)).await
    }

    /// Asserts the header controls are in place: menu, sort order and cart link
    pub async fn verify_header_controls_visible(&self) -> Result<()> {
        for locator in [
            &self.menu_button,
            &self.sort_dropdown,
            &self.shopping_cart_link,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PageModel for ProductsPage {
    fn name(&self) -> &'static str {
        "Products"
    }

    async fn verify_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base.assert_visible(&self.inventory_container).await?;
        self.base.assert_url(&self.reference.urls.inventory).await
    }
}
