// Checkout step one - Customer information form

use crate::base_page::BasePage;
use crate::customer::CustomerData;
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::pages::{PageModel, page_title};
use crate::reference::ReferenceData;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct CheckoutStepOnePage {
    base: BasePage,
    reference: Arc<ReferenceData>,
    page_title: Locator,
    first_name_input: Locator,
    last_name_input: Locator,
    zip_code_input: Locator,
    continue_button: Locator,
    cancel_button: Locator,
    error_message: Locator,
}

impl CheckoutStepOnePage {
    pub fn new(base: BasePage, reference: Arc<ReferenceData>) -> Self {
        Self {
            base,
            reference,
            page_title: page_title(),
            first_name_input: Locator::data_test("firstName"),
            last_name_input: Locator::data_test("lastName"),
            zip_code_input: Locator::data_test("postalCode"),
            continue_button: Locator::data_test("continue"),
            cancel_button: Locator::data_test("cancel"),
            error_message: Locator::data_test("error"),
        }
    }

    pub async fn verify_page_loaded(&self) -> Result<()> {
        self.verify_loaded().await
    }

    pub async fn fill_first_name(&self, first_name: &str) -> Result<()> {
        self.base.fill(&self.first_name_input, first_name).await
    }

    pub async fn fill_last_name(&self, last_name: &str) -> Result<()> {
        self.base.fill(&self.last_name_input, last_name).await
    }

    pub async fn fill_zip_code(&self, zip_code: &str) -> Result<()> {
        self.base.fill(&self.zip_code_input, zip_code).await
    }

    pub async fn fill_customer_information(&self, customer: &CustomerData) -> Result<()> {
        self.fill_first_name(&customer.first_name).await?;
        self.fill_last_name(&customer.last_name).await?;
        self.fill_zip_code(&customer.zip_code).await
    }

    /// Fills the form with a freshly generated customer and returns it
    pub async fn fill_random_customer_information(&self) -> Result<CustomerData> {
        let customer = CustomerData::random();
        debug!(?customer, "generated customer");
        self.fill_customer_information(&customer).await?;
        Ok(customer)
    }

    pub async fn click_continue(&self) -> Result<()> {
        self.base.assert_visible(&self.continue_button).await?;
        self.base.click(&self.continue_button).await
    }

    pub async fn click_cancel(&self) -> Result<()> {
        self.base.click(&self.cancel_button).await
    }

    /// Fills random customer data and moves on to the order overview
    pub async fn complete_step_one_with_random_data(&self) -> Result<CustomerData> {
        let customer = self.fill_random_customer_information().await?;
        self.click_continue().await?;
        Ok(customer)
    }

    pub async fn verify_error_message(&self, expected: &str) -> Result<()> {
        self.base.assert_visible(&self.error_message).await?;
        self.base.assert_text(&self.error_message, expected).await
    }

    pub async fn first_name_value(&self) -> Result<String> {
        self.base.read_value(&self.first_name_input).await
    }

    pub async fn last_name_value(&self) -> Result<String> {
        self.base.read_value(&self.last_name_input).await
    }

    pub async fn zip_code_value(&self) -> Result<String> {
        self.base.read_value(&self.zip_code_input).await
    }

    /// Reads the three fields back as a record
    pub async fn customer_values(&self) -> Result<CustomerData> {
        Ok(CustomerData::new(
            self.first_name_value().await?,
            self.last_name_value().await?,
            self.zip_code_value().await?,
        ))
    }

    pub async fn clear_all_fields(&self) -> Result<()> {
        for input in [
            &self.first_name_input,
            &self.last_name_input,
            &self.zip_code_input,
        ] {
            self.base.clear(input).await?;
        }
        Ok(())
    }

    pub async fn verify_all_fields_filled(&self) -> Result<()> {
        let values = self.customer_values().await?;
        let empty: Vec<&str> = [
            ("first name", &values.first_name),
            ("last name", &values.last_name),
            ("zip code", &values.zip_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if !empty.is_empty() {
            return Err(Error::Assertion(format!(
                "not all required fields are filled: {} empty",
                empty.join(", ")
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PageModel for CheckoutStepOnePage {
    fn name(&self) -> &'static str {
        "Checkout: Your Information"
    }

    async fn verify_loaded(&self) -> Result<()> {
        self.base.assert_visible(&self.page_title).await?;
        self.base
            .assert_text(&self.page_title, &self.reference.titles.checkout_step_one)
            .await?;
        self.base
            .assert_url(&self.reference.urls.checkout_step_one)
            .await?;
        for locator in [
            &self.first_name_input,
            &self.last_name_input,
            &self.zip_code_input,
            &self.continue_button,
            &self.cancel_button,
        ] {
            self.base.assert_visible(locator).await?;
        }
        Ok(())
    }
}
