//! Checkout validation
//!
//! The whole form is validated in one pass; every failing field is reported together.

use std::{collections::BTreeMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::checkout::{
    form::CheckoutForm,
    submission::{CardDetails, CheckoutSubmission, PaymentMethod, PaymentSelection, ShippingAddress},
};

static PHONE: Lazy<Regex> = Lazy::new(|| pattern(r"^\+?[0-9\s()-]{7,20}$"));
static CARD_NUMBER: Lazy<Regex> = Lazy::new(|| pattern(r"^[0-9]{13,19}$"));
static CARD_EXPIRY: Lazy<Regex> = Lazy::new(|| pattern(r"^(0[1-9]|1[0-2])/?[0-9]{2}$"));
static CARD_CVC: Lazy<Regex> = Lazy::new(|| pattern(r"^[0-9]{3,4}$"));

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the tests below"
)]
fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("checkout pattern should compile")
}

/// A checkout form field, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Recipient name
    FullName,
    /// Street line
    StreetAddress,
    /// City
    City,
    /// State or province
    StateProvince,
    /// ZIP or postal code
    ZipCode,
    /// Country
    Country,
    /// Contact phone
    PhoneNumber,
    /// Payment method
    PaymentMethod,
    /// Card number
    CardNumber,
    /// Card expiry
    CardExpiry,
    /// Card verification code
    #[serde(rename = "cardCVC")]
    CardCvc,
}

impl Field {
    /// Form field name
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::StreetAddress => "streetAddress",
            Field::City => "city",
            Field::StateProvince => "stateProvince",
            Field::ZipCode => "zipCode",
            Field::Country => "country",
            Field::PhoneNumber => "phoneNumber",
            Field::PaymentMethod => "paymentMethod",
            Field::CardNumber => "cardNumber",
            Field::CardExpiry => "cardExpiry",
            Field::CardCvc => "cardCVC",
        }
    }

    /// Message shown next to the field when it fails validation.
    pub fn message(self) -> &'static str {
        match self {
            Field::FullName => "Full name must be at least 2 characters.",
            Field::StreetAddress => "Street address is required.",
            Field::City => "City is required.",
            Field::StateProvince => "State/Province is required.",
            Field::ZipCode => "Valid ZIP/Postal code is required.",
            Field::Country => "Country is required.",
            Field::PhoneNumber => "Please enter a valid phone number.",
            Field::PaymentMethod => "Please select a payment method.",
            Field::CardNumber => "Valid card number is required (13-19 digits).",
            Field::CardExpiry => "Valid expiry date (MM/YY) is required.",
            Field::CardCvc => "Valid CVC (3-4 digits) is required.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
#[error("{} checkout field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<Field, &'static str>,
}

impl FieldErrors {
    /// The message for a field, if it failed.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Check if a field failed.
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// Failing fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.errors.iter().map(|(field, message)| (*field, *message))
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn require(&mut self, field: Field, passed: bool) {
        if !passed {
            self.errors.insert(field, field.message());
        }
    }
}

/// Validate a checkout form.
///
/// # Errors
///
/// Returns [`FieldErrors`] listing every field that failed.
pub fn validate(form: &CheckoutForm) -> Result<CheckoutSubmission, FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.require(Field::FullName, min_len(&form.full_name, 2));
    errors.require(Field::StreetAddress, min_len(&form.street_address, 5));
    errors.require(Field::City, min_len(&form.city, 2));
    errors.require(Field::StateProvince, min_len(&form.state_province, 2));
    errors.require(Field::ZipCode, min_len(&form.zip_code, 3));
    errors.require(Field::Country, min_len(&form.country, 2));

    let phone_number = present(&form.phone_number);

    if let Some(phone_number) = phone_number {
        errors.require(Field::PhoneNumber, PHONE.is_match(phone_number));
    }

    let method = form
        .payment_method
        .as_deref()
        .and_then(|value| value.parse::<PaymentMethod>().ok());

    errors.require(Field::PaymentMethod, method.is_some());

    if method == Some(PaymentMethod::CreditCard) {
        errors.require(Field::CardNumber, CARD_NUMBER.is_match(&form.card_number));
        errors.require(Field::CardExpiry, CARD_EXPIRY.is_match(&form.card_expiry));
        errors.require(Field::CardCvc, CARD_CVC.is_match(&form.card_cvc));
    }

    let Some(method) = method else {
        return Err(errors);
    };

    if !errors.is_empty() {
        debug!(failed = errors.len(), "checkout form rejected");

        return Err(errors);
    }

    let payment = match method {
        PaymentMethod::CreditCard => PaymentSelection::Card(CardDetails::new(
            form.card_number.clone(),
            form.card_expiry.clone(),
            form.card_cvc.clone(),
        )),
        PaymentMethod::DoraPay => PaymentSelection::DoraPay,
        PaymentMethod::GadgetWallet => PaymentSelection::GadgetWallet,
    };

    let address = ShippingAddress {
        full_name: form.full_name.clone(),
        street_address: form.street_address.clone(),
        apartment_suite: present(&form.apartment_suite).map(str::to_string),
        city: form.city.clone(),
        state_province: form.state_province.clone(),
        zip_code: form.zip_code.clone(),
        country: form.country.clone(),
        phone_number: phone_number.map(str::to_string),
    };

    Ok(CheckoutSubmission { address, payment })
}

/// Lengths are counted in UTF-16 code units, as the storefront's browser form counts them.
fn min_len(value: &str, min: usize) -> bool {
    value.encode_utf16().count() >= min
}

fn present(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
