//! Pricing

use rusty_money::{Money, iso::Currency};

/// A monetary amount in one of the ISO currencies.
pub type Price = Money<'static, Currency>;

/// Returns a zero amount in the given currency.
pub fn zero(currency: &'static Currency) -> Price {
    Money::from_minor(0, currency)
}

/// Returns `true` if the price is below zero.
pub fn is_negative(price: &Price) -> bool {
    price.to_minor_units() < 0
}

/// Calculates the cost of `quantity` units at `unit_price`.
pub fn line_total(unit_price: &Price, quantity: u32) -> Price {
    Money::from_minor(
        unit_price
            .to_minor_units()
            .saturating_mul(i64::from(quantity)),
        unit_price.currency(),
    )
}

/// Sums a list of prices that are all denominated in `currency`.
///
/// Callers guarantee the currency; mismatched prices are a logic error.
pub fn total_price<'p>(
    currency: &'static Currency,
    prices: impl IntoIterator<Item = &'p Price>,
) -> Price {
    let minor_units = prices.into_iter().fold(0_i64, |acc, price| {
        debug_assert!(
            price.currency() == currency,
            "price in {} summed into {} total",
            price.currency().iso_alpha_code,
            currency.iso_alpha_code
        );

        acc.saturating_add(price.to_minor_units())
    });

    Money::from_minor(minor_units, currency)
}
