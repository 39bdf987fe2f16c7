//! Checkout form

use serde::{Deserialize, Serialize};

/// Countries offered by the checkout country picker. Validation only enforces length.
pub const COUNTRIES: [&str; 4] = ["Japan", "Future Japan", "Dora-Dimension", "Other"];

/// Raw values typed into the checkout form, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    /// Recipient name
    pub full_name: String,

    /// Street line
    pub street_address: String,

    /// Apartment, suite, unit (optional)
    pub apartment_suite: String,

    /// City
    pub city: String,

    /// State or province
    pub state_province: String,

    /// ZIP or postal code
    pub zip_code: String,

    /// Country
    pub country: String,

    /// Contact phone (optional)
    pub phone_number: String,

    /// Selected payment method wire value, if any
    pub payment_method: Option<String>,

    /// Card number
    pub card_number: String,

    /// Card expiry, `MM/YY`
    pub card_expiry: String,

    /// Card verification code
    #[serde(rename = "cardCVC")]
    pub card_cvc: String,
}

impl Default for CheckoutForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            street_address: String::new(),
            apartment_suite: String::new(),
            city: String::new(),
            state_province: String::new(),
            zip_code: String::new(),
            country: "Japan".to_string(),
            phone_number: String::new(),
            payment_method: None,
            card_number: String::new(),
            card_expiry: String::new(),
            card_cvc: String::new(),
        }
    }
}
