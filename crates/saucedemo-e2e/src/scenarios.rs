// The suite - Nine scenarios over the purchase workflow
//
// One full journey from login to order confirmation, five scenarios that
// each isolate a single capability, and three negative paths asserting the
// application's exact error strings. Every scenario logs in (or fails to)
// on its own.

use crate::customer::CustomerData;
use crate::error::{Error, Result};
use crate::pages::{PageModel, Pages};
use crate::reference::ReferenceData;
use crate::scenario::{Scenario, ScenarioContext, StepRecorder};
use async_trait::async_trait;
use tracing::info;

/// Every scenario of the suite, in execution order
pub fn all() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(CompletePurchaseJourney),
        Box::new(LoginOnly),
        Box::new(AddToCartOnly),
        Box::new(CartOnly),
        Box::new(CheckoutFormOnly),
        Box::new(OrderReviewOnly),
        Box::new(EmptyLoginFields),
        Box::new(InvalidCredentials),
        Box::new(EmptyCheckoutForm),
    ]
}

// ============================================================================
// Shared prefixes
// ============================================================================

async fn open_login_page(pages: &Pages, steps: &mut StepRecorder) -> Result<()> {
    steps
        .run("Open login page", async {
            pages.login.navigate().await?;
            pages.login.verify_loaded().await
        })
        .await
}

async fn log_in(pages: &Pages, steps: &mut StepRecorder) -> Result<()> {
    steps
        .run("Log in as standard user", async {
            pages.login.navigate().await?;
            pages.login.login_with_valid_credentials().await?;
            pages.login.verify_successful_login().await
        })
        .await
}

async fn add_backpack(pages: &Pages, steps: &mut StepRecorder) -> Result<()> {
    steps
        .run("Add Sauce Labs Backpack to cart", async {
            pages.products.verify_products_page_loaded().await?;
            pages.products.add_sauce_labs_backpack_to_cart().await
        })
        .await
}

async fn open_checkout(pages: &Pages, steps: &mut StepRecorder) -> Result<()> {
    log_in(pages, steps).await?;
    add_backpack(pages, steps).await?;
    steps
        .run("Open cart and start checkout", async {
            pages.products.click_shopping_cart().await?;
            pages.cart.click_checkout().await
        })
        .await
}

/// Fails when a summary amount came back empty
fn require_amount(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Assertion(format!(
            "expected a non-empty {what} amount, but found ''"
        )));
    }
    Ok(())
}

fn require_same_customer(expected: &CustomerData, actual: &CustomerData) -> Result<()> {
    for (field, want, got) in [
        ("first name", &expected.first_name, &actual.first_name),
        ("last name", &expected.last_name, &actual.last_name),
        ("zip code", &expected.zip_code, &actual.zip_code),
    ] {
        if want != got {
            return Err(Error::mismatch(field, want, got));
        }
    }
    Ok(())
}

// ============================================================================
// Full journey
// ============================================================================

/// Login to order confirmation and back to the catalog
pub struct CompletePurchaseJourney;

#[async_trait]
impl Scenario for CompletePurchaseJourney {
    fn name(&self) -> &str {
        "Complete SauceDemo e-commerce workflow - Login to Order Completion"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext {
            pages,
            reference,
            steps,
        } = ctx;
        let product = reference.product.as_str();

        steps
            .run("Navigate to SauceDemo website", async {
                pages.login.navigate().await?;
                pages.login.verify_loaded().await
            })
            .await?;

        steps
            .run("Login with valid credentials", async {
                pages.login.login_with_valid_credentials().await?;
                pages.login.verify_successful_login().await
            })
            .await?;

        steps
            .run("Add Sauce Labs Backpack to cart", async {
                let products = &pages.products;
                products.verify_products_page_loaded().await?;
                products.verify_product_visible(product).await?;
                products.add_sauce_labs_backpack_to_cart().await?;
                products.verify_cart_item_count(1).await?;
                products.verify_remove_button_visible(product).await
            })
            .await?;

        steps
            .run("Navigate to shopping cart", async {
                pages.products.click_shopping_cart().await?;
                pages.cart.verify_cart_page_loaded().await?;
                pages.cart.verify_sauce_labs_backpack_in_cart().await?;
                pages.cart.verify_cart_item_count(1).await
            })
            .await?;

        steps
            .run("Proceed to checkout", async {
                pages.cart.verify_checkout_button_visible().await?;
                pages.cart.click_checkout().await?;
                pages.checkout_step_one.verify_loaded().await
            })
            .await?;

        let customer = steps
            .run("Fill customer information with random data", async {
                let customer = pages
                    .checkout_step_one
                    .fill_random_customer_information()
                    .await?;
                pages.checkout_step_one.verify_all_fields_filled().await?;
                Ok::<_, Error>(customer)
            })
            .await?;
        info!(
            first_name = %customer.first_name,
            last_name = %customer.last_name,
            zip_code = %customer.zip_code,
            "customer information filled"
        );

        steps
            .run("Continue to order review", async {
                let overview = &pages.checkout_step_two;
                pages.checkout_step_one.click_continue().await?;
                overview.verify_loaded().await?;
                overview.verify_sauce_labs_backpack_in_order_summary().await?;
                overview.verify_order_item_count(1).await
            })
            .await?;

        steps
            .run("Complete the order", async {
                let overview = &pages.checkout_step_two;
                overview.verify_order_summary_complete().await?;
                require_amount("subtotal", &overview.subtotal_amount().await?)?;
                require_amount("tax", &overview.tax_amount().await?)?;
                require_amount("total", &overview.total_amount().await?)?;
                overview.click_finish().await?;
                pages.checkout_complete.verify_loaded().await
            })
            .await?;

        steps
            .run("Verify order completion success message", async {
                let complete = &pages.checkout_complete;
                complete.verify_complete_order_success().await?;
                complete
                    .verify_success_message(&reference.messages.order_dispatched)
                    .await?;
                complete.verify_thank_you_message().await?;
                complete.verify_order_complete_message().await
            })
            .await?;

        steps
            .run("Return to products page", async {
                pages.checkout_complete.click_back_home().await?;
                pages.products.verify_products_page_loaded().await
            })
            .await
    }
}

// ============================================================================
// Single capabilities
// ============================================================================

pub struct LoginOnly;

#[async_trait]
impl Scenario for LoginOnly {
    fn name(&self) -> &str {
        "Verify login functionality independently"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext { pages, steps, .. } = ctx;

        open_login_page(pages, steps).await?;
        steps
            .run("Login with valid credentials", async {
                pages.login.login_with_valid_credentials().await?;
                pages.login.verify_successful_login().await?;
                pages.products.verify_products_page_loaded().await
            })
            .await
    }
}

pub struct AddToCartOnly;

#[async_trait]
impl Scenario for AddToCartOnly {
    fn name(&self) -> &str {
        "Verify product addition to cart independently"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext {
            pages,
            reference,
            steps,
        } = ctx;
        let product = reference.product.as_str();

        log_in(pages, steps).await?;
        steps
            .run("Add Sauce Labs Backpack to cart", async {
                let products = &pages.products;
                products.verify_products_page_loaded().await?;
                products.verify_product_visible(product).await?;
                products.add_sauce_labs_backpack_to_cart().await?;
                products.verify_cart_item_count(1).await?;
                products.verify_remove_button_visible(product).await
            })
            .await
    }
}

pub struct CartOnly;

#[async_trait]
impl Scenario for CartOnly {
    fn name(&self) -> &str {
        "Verify cart functionality independently"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext { pages, steps, .. } = ctx;

        log_in(pages, steps).await?;
        add_backpack(pages, steps).await?;
        steps
            .run("Review cart contents", async {
                pages.products.click_shopping_cart().await?;
                pages.cart.verify_cart_page_loaded().await?;
                pages.cart.verify_sauce_labs_backpack_in_cart().await?;
                pages.cart.verify_cart_item_count(1).await?;
                pages.cart.verify_checkout_button_visible().await
            })
            .await
    }
}

pub struct CheckoutFormOnly;

#[async_trait]
impl Scenario for CheckoutFormOnly {
    fn name(&self) -> &str {
        "Verify checkout form functionality independently"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext { pages, steps, .. } = ctx;

        open_checkout(pages, steps).await?;
        steps
            .run("Fill and read back customer information", async {
                let form = &pages.checkout_step_one;
                form.verify_loaded().await?;
                let customer = form.fill_random_customer_information().await?;
                form.verify_all_fields_filled().await?;
                let entered = form.customer_values().await?;
                require_same_customer(&customer, &entered)
            })
            .await
    }
}

pub struct OrderReviewOnly;

#[async_trait]
impl Scenario for OrderReviewOnly {
    fn name(&self) -> &str {
        "Verify order review functionality independently"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext { pages, steps, .. } = ctx;

        open_checkout(pages, steps).await?;
        steps
            .run("Complete step one with random data", async {
                pages
                    .checkout_step_one
                    .complete_step_one_with_random_data()
                    .await
            })
            .await?;
        steps
            .run("Review order summary", async {
                let overview = &pages.checkout_step_two;
                overview.verify_loaded().await?;
                overview.verify_sauce_labs_backpack_in_order_summary().await?;
                overview.verify_order_item_count(1).await?;
                overview.verify_order_summary_complete().await?;
                require_amount("subtotal", &overview.subtotal_amount().await?)?;
                require_amount("tax", &overview.tax_amount().await?)?;
                require_amount("total", &overview.total_amount().await?)
            })
            .await
    }
}

// ============================================================================
// Negative paths
// ============================================================================

pub struct EmptyLoginFields;

#[async_trait]
impl Scenario for EmptyLoginFields {
    fn name(&self) -> &str {
        "Verify error handling for empty login fields"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext {
            pages,
            reference,
            steps,
        } = ctx;

        open_login_page(pages, steps).await?;
        steps
            .run("Submit empty login form", async {
                pages.login.click_login_button().await?;
                pages
                    .login
                    .verify_error_message(&reference.messages.missing_username)
                    .await
            })
            .await
    }
}

pub struct InvalidCredentials;

#[async_trait]
impl Scenario for InvalidCredentials {
    fn name(&self) -> &str {
        "Verify error handling for invalid credentials"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext {
            pages,
            reference,
            steps,
        } = ctx;

        open_login_page(pages, steps).await?;
        steps
            .run("Login with invalid credentials", async {
                let user = &reference.invalid_user;
                pages.login.login(&user.username, &user.password).await?;
                pages
                    .login
                    .verify_error_message(&reference.messages.invalid_credentials)
                    .await
            })
            .await
    }
}

pub struct EmptyCheckoutForm;

#[async_trait]
impl Scenario for EmptyCheckoutForm {
    fn name(&self) -> &str {
        "Verify error handling for empty checkout form"
    }

    async fn run(&self, ctx: &mut ScenarioContext) -> Result<()> {
        let ScenarioContext {
            pages,
            reference,
            steps,
        } = ctx;

        open_checkout(pages, steps).await?;
        steps
            .run("Submit empty checkout form", async {
                let form = &pages.checkout_step_one;
                form.verify_loaded().await?;
                form.click_continue().await?;
                form.verify_error_message(&reference.messages.missing_first_name)
                    .await
            })
            .await
    }
}

/// Reference data the scenarios rely on, for callers listing the suite
pub fn describe(reference: &ReferenceData) -> String {
    format!(
        "{} scenarios against {} as {} buying \"{}\"",
        all().len(),
        reference.urls.base,
        reference.valid_user.username,
        reference.product
    )
}
