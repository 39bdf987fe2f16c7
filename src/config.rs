//! Storefront configuration
//!
//! Values come from command line flags, falling back to environment variables (a `.env` file
//! is honoured) and then to the defaults below.

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Args};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    checkout::CheckoutSettings,
    fixtures::{Fixture, FixtureError},
    orders::{DEFAULT_ORDER_PREFIX, RandomOrderIds},
    pricing::Price,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shipping fee is negative or too large to represent.
    #[error("Invalid shipping fee: {0}")]
    InvalidShippingFee(Decimal),

    /// The fixture could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Storefront settings
#[derive(Debug, Clone, Args)]
pub struct StorefrontConfig {
    /// Flat shipping fee, in the catalog currency
    #[arg(long, env = "POCKET_SHIPPING_FEE", default_value = "5.00")]
    pub shipping_fee: Decimal,

    /// Simulated order processing time, in milliseconds
    #[arg(long, env = "POCKET_PROCESSING_DELAY_MS", default_value = "1500")]
    pub processing_delay_ms: u64,

    /// Delivery estimate shown on confirmations, in minutes
    #[arg(long, env = "POCKET_DELIVERY_ESTIMATE_MINUTES", default_value = "30")]
    pub delivery_estimate_minutes: u64,

    /// Prefix for generated order ids
    #[arg(long, env = "POCKET_ORDER_PREFIX", default_value = DEFAULT_ORDER_PREFIX)]
    pub order_prefix: String,

    /// Empty the cart after an order is placed
    #[arg(
        long,
        env = "POCKET_CLEAR_CART_ON_ORDER",
        default_value = "true",
        action = ArgAction::Set
    )]
    pub clear_cart_on_order: bool,

    /// Storefront fixture file; the bundled storefront is used when omitted
    #[arg(long, env = "POCKET_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl StorefrontConfig {
    /// Checkout timing and cart policy.
    #[must_use]
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            processing_delay: Duration::from_millis(self.processing_delay_ms),
            delivery_estimate: Duration::from_secs(
                self.delivery_estimate_minutes.saturating_mul(60),
            ),
            clear_cart_on_order: self.clear_cart_on_order,
        }
    }

    /// The shipping fee as a price in `currency`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidShippingFee`] if the fee is negative or out of range.
    pub fn shipping_fee_in(&self, currency: &'static Currency) -> Result<Price, ConfigError> {
        if self.shipping_fee < Decimal::ZERO {
            return Err(ConfigError::InvalidShippingFee(self.shipping_fee));
        }

        let minor_units = self
            .shipping_fee
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|value| value.round_dp(0).to_i64())
            .ok_or(ConfigError::InvalidShippingFee(self.shipping_fee))?;

        Ok(Money::from_minor(minor_units, currency))
    }

    /// Order id generator using the configured prefix.
    #[must_use]
    pub fn order_ids(&self) -> RandomOrderIds {
        RandomOrderIds::from_entropy(self.order_prefix.clone())
    }

    /// Load the configured fixture, or the bundled storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or is invalid.
    pub fn load_fixture(&self) -> Result<Fixture, ConfigError> {
        let fixture = match &self.fixtures {
            Some(path) => Fixture::from_path(path)?,
            None => Fixture::storefront()?,
        };

        Ok(fixture)
    }
}
