// Page models - One value per application screen
//
// Each model binds its screen's locators at construction and composes the
// base primitives into business operations. Models hold no state of their
// own beyond the locators; everything else is read back from the live page.

pub mod cart;
pub mod checkout_complete;
pub mod checkout_step_one;
pub mod checkout_step_two;
pub mod login;
pub mod products;

pub use cart::CartPage;
pub use checkout_complete::CheckoutCompletePage;
pub use checkout_step_one::CheckoutStepOnePage;
pub use checkout_step_two::CheckoutStepTwoPage;
pub use login::LoginPage;
pub use products::ProductsPage;

use crate::base_page::BasePage;
use crate::config::SuiteConfig;
use crate::driver::Driver;
use crate::error::Result;
use crate::locator::Locator;
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;

/// Behaviour every screen model shares
#[async_trait]
pub trait PageModel: Send + Sync {
    /// Screen name used in logs and reports
    fn name(&self) -> &'static str;

    /// Asserts the session is on this screen: title, URL and defining elements.
    ///
    /// Only reads; calling it again on a loaded screen succeeds again.
    async fn verify_loaded(&self) -> Result<()>;
}

/// Title element shared by the secondary header of every inner screen
pub(crate) fn page_title() -> Locator {
    Locator::css(".title")
}

/// Strips a currency label such as `"Tax: $"` from a summary line
///
/// Text without the label is returned unchanged.
pub fn strip_amount_label(text: &str, label: &str) -> String {
    let text = text.trim();
    text.strip_prefix(label).unwrap_or(text).trim().to_string()
}

/// Fresh set of page models bound to one session
pub struct Pages {
    pub login: LoginPage,
    pub products: ProductsPage,
    pub cart: CartPage,
    pub checkout_step_one: CheckoutStepOnePage,
    pub checkout_step_two: CheckoutStepTwoPage,
    pub checkout_complete: CheckoutCompletePage,
}

impl Pages {
    pub fn new(driver: Arc<dyn Driver>, config: &SuiteConfig) -> Self {
        let base = BasePage::new(driver, config.timeouts);
        let reference = Arc::new(config.reference.clone());
        Self::with_base(base, reference)
    }

    pub fn with_base(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            login: LoginPage::new(base.clone(), reference.clone()),
            products: ProductsPage::new(base.clone(), reference.clone()),
            cart: CartPage::new(base.clone(), reference.clone()),
            checkout_step_one: CheckoutStepOnePage::new(base.clone(), reference.clone()),
            checkout_step_two: CheckoutStepTwoPage::new(base.clone(), reference.clone()),
            checkout_complete: CheckoutCompletePage::new(base, reference),
        }
    }
}
