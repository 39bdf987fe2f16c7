//! Catalog Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::{CatalogItem, CatalogItemId, ItemDetail},
    fixtures::FixtureError,
    pricing::Price,
};

/// Storefront fixture file
#[derive(Debug, Deserialize)]
pub struct StorefrontFixture {
    /// Currency code every price must use (e.g. "USD")
    pub currency: String,

    /// Items in display order
    pub items: Vec<ItemFixture>,

    /// Homepage bestseller ids
    #[serde(default)]
    pub bestsellers: Vec<CatalogItemId>,

    /// Menu categories
    #[serde(default)]
    pub categories: Vec<CategoryFixture>,

    /// Daily special ids
    #[serde(default)]
    pub specials: Vec<CatalogItemId>,

    /// Item detail pages keyed by item id
    #[serde(default)]
    pub details: FxHashMap<CatalogItemId, ItemDetail>,

    /// Lines the cart starts with
    #[serde(default)]
    pub cart: Vec<CartLineFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Item id
    pub id: CatalogItemId,

    /// Item name
    pub name: String,

    /// Item price (e.g., "3.50 USD")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<ItemFixture> for CatalogItem {
    type Error = FixtureError;

    fn try_from(fixture: ItemFixture) -> Result<Self, Self::Error> {
        let price = parse_price(&fixture.price)?;
        let item = CatalogItem::new(fixture.id, fixture.name, price, fixture.image)?;

        Ok(match fixture.description {
            Some(description) => item.with_description(description),
            None => item,
        })
    }
}

/// Menu category fixture
#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
    /// Category name
    pub name: String,

    /// Item ids in display order
    pub items: Vec<CatalogItemId>,
}

/// Seeded cart line
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Item id
    pub item: CatalogItemId,

    /// Quantity, at least one
    pub quantity: u32,
}

/// Parse a price string (e.g., "3.50 USD").
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal number, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Price, FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, parse_currency(code)?))
}

/// Look up one of the supported currency codes.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for anything other than USD, GBP or EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "USD" => Ok(USD),
        "GBP" => Ok(GBP),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        assert_eq!(parse_price("3.50 USD")?, Money::from_minor(350, USD));
        assert_eq!(parse_price("12 GBP")?, Money::from_minor(1200, GBP));
        assert_eq!(parse_price("  0.99   EUR ")?, Money::from_minor(99, EUR));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_bad_input() {
        assert!(matches!(
            parse_price("3.50"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("three USD"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("3.50 USD extra"),
            Err(FixtureError::InvalidPrice(_))
        ));
        assert!(matches!(
            parse_price("3.50 JPY"),
            Err(FixtureError::UnknownCurrency(code)) if code == "JPY"
        ));
    }

    #[test]
    fn negative_item_price_is_rejected() {
        let fixture = ItemFixture {
            id: "bad".into(),
            name: "Debt Dorayaki".to_string(),
            price: "-1.00 USD".to_string(),
            image: String::new(),
            description: None,
        };

        assert!(matches!(
            CatalogItem::try_from(fixture),
            Err(FixtureError::Catalog(_))
        ));
    }
}
