//! Checkout
//!
//! Raw form values go through [`validate`], which either yields a typed
//! [`CheckoutSubmission`] or reports every failing field at once. [`CheckoutFlow`] turns a
//! valid submission into an order and simulates processing before confirming it.

mod flow;
mod form;
mod submission;
mod validation;

pub use flow::{CheckoutError, CheckoutFlow, CheckoutSettings, Processing};
pub use form::{COUNTRIES, CheckoutForm};
pub use submission::{
    CardDetails, CheckoutSubmission, PaymentMethod, PaymentSelection, ShippingAddress,
    UnknownPaymentMethod,
};
pub use validation::{Field, FieldErrors, validate};
