//! Fixtures
//!
//! The storefront's placeholder data lives in YAML. A bundled copy is compiled in; other
//! fixture files can be loaded from disk.

use std::{fs, path::Path};

use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{Cart, CartError, Quantity},
    catalog::{Catalog, CatalogError, CatalogItem, CatalogItemId, CatalogProvider, MenuCategory},
    notifications::Notifier,
    pricing::Price,
};

pub mod catalog;

pub use catalog::{parse_currency, parse_price};

const STOREFRONT: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/fixtures/storefront.yml"
));

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A seeded cart line has quantity zero
    #[error("Cart line for {0} must have a quantity of at least 1")]
    InvalidQuantity(CatalogItemId),

    /// A seeded cart line names an item that is not in the catalog
    #[error("Item not found: {0}")]
    ItemNotFound(CatalogItemId),

    /// Currency mismatch between the catalog and a price supplied alongside it
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Catalog assembly error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// A loaded storefront: catalog plus the lines the cart starts with.
#[derive(Debug, Clone)]
pub struct Fixture {
    catalog: Catalog,
    cart: Vec<(CatalogItemId, Quantity)>,
}

impl Fixture {
    /// Load the bundled storefront fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture is invalid.
    pub fn storefront() -> Result<Self, FixtureError> {
        Self::from_yaml(STOREFRONT)
    }

    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid storefront.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let path = path.as_ref();

        debug!(path = %path.display(), "loading fixture");

        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, a price is malformed, an item id is
    /// repeated, a section references an unknown item or prices mix currencies.
    pub fn from_yaml(contents: &str) -> Result<Self, FixtureError> {
        let fixture: catalog::StorefrontFixture = serde_norway::from_str(contents)?;

        let mut catalog = Catalog::new(parse_currency(&fixture.currency)?);

        for item in fixture.items {
            catalog.insert(CatalogItem::try_from(item)?)?;
        }

        catalog.set_bestsellers(fixture.bestsellers)?;

        for category in fixture.categories {
            catalog.push_category(MenuCategory {
                name: category.name,
                item_ids: category.items,
            })?;
        }

        catalog.set_specials(fixture.specials)?;

        for (id, detail) in fixture.details {
            catalog.insert_detail(id, detail)?;
        }

        let cart = fixture
            .cart
            .into_iter()
            .map(|line| {
                if catalog.get(&line.item).is_none() {
                    return Err(FixtureError::ItemNotFound(line.item));
                }

                match Quantity::new(line.quantity) {
                    Some(quantity) => Ok((line.item, quantity)),
                    None => Err(FixtureError::InvalidQuantity(line.item)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            items = catalog.len(),
            cart_lines = cart.len(),
            "fixture loaded"
        );

        Ok(Self { catalog, cart })
    }

    /// The catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Take the catalog, dropping the seeded cart lines.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Seeded cart lines, as item id and quantity.
    pub fn cart_lines(&self) -> &[(CatalogItemId, Quantity)] {
        &self.cart
    }

    /// Build a cart holding the seeded lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the shipping fee is not in the catalog currency.
    pub fn cart<N: Notifier>(
        &self,
        shipping_fee: Price,
        notifier: N,
    ) -> Result<Cart<N>, FixtureError> {
        if shipping_fee.currency() != self.catalog.currency() {
            return Err(FixtureError::CurrencyMismatch(
                self.catalog.currency().iso_alpha_code.to_string(),
                shipping_fee.currency().iso_alpha_code.to_string(),
            ));
        }

        let lines = self
            .cart
            .iter()
            .map(|(id, quantity)| {
                self.catalog
                    .get(id)
                    .cloned()
                    .map(|item| (item, *quantity))
                    .ok_or_else(|| FixtureError::ItemNotFound(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart::with_lines(shipping_fee, lines, notifier)?)
    }
}
