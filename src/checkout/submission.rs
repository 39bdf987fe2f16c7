//! Validated checkout data

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A shipping address that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,

    /// Street line
    pub street_address: String,

    /// Apartment, suite, unit
    pub apartment_suite: Option<String>,

    /// City
    pub city: String,

    /// State or province
    pub state_province: String,

    /// ZIP or postal code
    pub zip_code: String,

    /// Country
    pub country: String,

    /// Contact phone
    pub phone_number: Option<String>,
}

/// The payment methods the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Credit or debit card
    CreditCard,

    /// Dora-Pay gadget balance
    DoraPay,

    /// Future Wallet link
    GadgetWallet,
}

impl PaymentMethod {
    /// Every method, in the order the form lists them.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DoraPay,
        PaymentMethod::GadgetWallet,
    ];

    /// Form value for this method
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::DoraPay => "doraPay",
            PaymentMethod::GadgetWallet => "gadgetWallet",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit/Debit Card",
            PaymentMethod::DoraPay => "Dora-Pay™ (Gadget Balance)",
            PaymentMethod::GadgetWallet => "Future Wallet Link",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The form value did not name a known payment method.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Card details. Only exist when paying by card.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    number: String,
    expiry: String,
    cvc: String,
}

impl CardDetails {
    pub(crate) fn new(number: String, expiry: String, cvc: String) -> Self {
        Self {
            number,
            expiry,
            cvc,
        }
    }

    /// Last four digits of the card number.
    pub fn last_four(&self) -> &str {
        let start = self.number.len().saturating_sub(4);

        self.number.get(start..).unwrap_or_default()
    }

    /// Expiry, as entered (`MM/YY` or `MMYY`)
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Number of digits in the verification code.
    pub fn cvc_len(&self) -> usize {
        self.cvc.len()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &format_args!("•••• {}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("cvc", &"•••")
            .finish()
    }
}

/// How the shopper pays. Card details are only carried by the card variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentSelection {
    /// Credit or debit card
    Card(CardDetails),

    /// Dora-Pay gadget balance
    DoraPay,

    /// Future Wallet link
    GadgetWallet,
}

impl PaymentSelection {
    /// The method this selection uses.
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentSelection::Card(_) => PaymentMethod::CreditCard,
            PaymentSelection::DoraPay => PaymentMethod::DoraPay,
            PaymentSelection::GadgetWallet => PaymentMethod::GadgetWallet,
        }
    }
}

/// Address and payment that together passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSubmission {
    /// Where to deliver
    pub address: ShippingAddress,

    /// How to pay
    pub payment: PaymentSelection,
}
