//! Catalog
//!
//! Sellable items and the storefront sections (bestsellers, menu categories, daily specials,
//! item details) that reference them.

use std::fmt;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::{Price, is_negative};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two items share the same id.
    #[error("Duplicate catalog item id: {0}")]
    DuplicateId(CatalogItemId),

    /// An item was priced below zero.
    #[error("Catalog item {0} has a negative price")]
    NegativePrice(CatalogItemId),

    /// An item's currency differs from the catalog currency (item, item currency, catalog currency).
    #[error("Catalog item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(CatalogItemId, &'static str, &'static str),

    /// A section referenced an item that is not in the catalog.
    #[error("Unknown catalog item: {0}")]
    UnknownItem(CatalogItemId),
}

/// Catalog item identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogItemId(String);

impl CatalogItemId {
    /// Creates an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CatalogItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A sellable item.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    id: CatalogItemId,
    name: String,
    price: Price,
    image_url: String,
    description: Option<String>,
}

impl CatalogItem {
    /// Creates a new catalog item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NegativePrice`] if the price is below zero.
    pub fn new(
        id: impl Into<CatalogItemId>,
        name: impl Into<String>,
        price: Price,
        image_url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();

        if is_negative(&price) {
            return Err(CatalogError::NegativePrice(id));
        }

        Ok(Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
            description: None,
        })
    }

    /// Attaches a short description, as shown on the specials board.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Item id
    pub fn id(&self) -> &CatalogItemId {
        &self.id
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> &Price {
        &self.price
    }

    /// Image reference
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Optional short description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A named group of menu items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCategory {
    /// Category name
    pub name: String,

    /// Items in display order
    pub item_ids: Vec<CatalogItemId>,
}

/// A gallery image for the item detail view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryImage {
    /// Image source
    pub src: String,

    /// Alternative text
    pub alt: String,
}

/// Extended information for an item detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemDetail {
    /// Long-form description
    pub long_description: String,

    /// Ingredients in listing order
    pub ingredients: Vec<String>,

    /// Nutritional information
    pub nutritional_info: String,

    /// Allergen information
    pub allergen_info: String,

    /// Preparation time, free text
    pub preparation_time: String,

    /// Gallery images
    pub images: Vec<GalleryImage>,
}

/// Supplies catalog items to the storefront views and the cart.
pub trait CatalogProvider {
    /// Currency every item is priced in
    fn currency(&self) -> &'static Currency;

    /// All items in display order
    fn items(&self) -> &[CatalogItem];

    /// Look up an item by id
    fn get(&self, id: &CatalogItemId) -> Option<&CatalogItem>;
}

/// The storefront catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,
    items: Vec<CatalogItem>,
    index: FxHashMap<CatalogItemId, usize>,
    bestsellers: Vec<CatalogItemId>,
    categories: Vec<MenuCategory>,
    specials: Vec<CatalogItemId>,
    details: FxHashMap<CatalogItemId, ItemDetail>,
}

impl Catalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
            index: FxHashMap::default(),
            bestsellers: Vec::new(),
            categories: Vec::new(),
            specials: Vec::new(),
            details: FxHashMap::default(),
        }
    }

    /// Add an item to the catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateId`]: an item with the same id already exists.
    /// - [`CatalogError::CurrencyMismatch`]: the item is not priced in the catalog currency.
    pub fn insert(&mut self, item: CatalogItem) -> Result<(), CatalogError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                item.id.clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.index.contains_key(item.id()) {
            return Err(CatalogError::DuplicateId(item.id.clone()));
        }

        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);

        Ok(())
    }

    /// Set the homepage bestsellers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if an id is not in the catalog.
    pub fn set_bestsellers(&mut self, ids: Vec<CatalogItemId>) -> Result<(), CatalogError> {
        self.ensure_known(&ids)?;
        self.bestsellers = ids;

        Ok(())
    }

    /// Append a menu category.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if an id is not in the catalog.
    pub fn push_category(&mut self, category: MenuCategory) -> Result<(), CatalogError> {
        self.ensure_known(&category.item_ids)?;
        self.categories.push(category);

        Ok(())
    }

    /// Set today's specials.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if an id is not in the catalog.
    pub fn set_specials(&mut self, ids: Vec<CatalogItemId>) -> Result<(), CatalogError> {
        self.ensure_known(&ids)?;
        self.specials = ids;

        Ok(())
    }

    /// Attach detail information to an item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownItem`] if the id is not in the catalog.
    pub fn insert_detail(
        &mut self,
        id: CatalogItemId,
        detail: ItemDetail,
    ) -> Result<(), CatalogError> {
        self.ensure_known(std::slice::from_ref(&id))?;
        self.details.insert(id, detail);

        Ok(())
    }

    /// Homepage bestsellers, in display order.
    pub fn bestsellers(&self) -> impl Iterator<Item = &CatalogItem> {
        self.resolve(&self.bestsellers)
    }

    /// Menu categories, in display order.
    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    /// Items belonging to a menu category.
    pub fn category_items<'c>(
        &'c self,
        category: &'c MenuCategory,
    ) -> impl Iterator<Item = &'c CatalogItem> {
        self.resolve(&category.item_ids)
    }

    /// Today's specials, in display order.
    pub fn specials(&self) -> impl Iterator<Item = &CatalogItem> {
        self.resolve(&self.specials)
    }

    /// Detail information for an item, if any was provided.
    pub fn detail(&self, id: &CatalogItemId) -> Option<&ItemDetail> {
        self.details.get(id)
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn resolve<'c>(
        &'c self,
        ids: &'c [CatalogItemId],
    ) -> impl Iterator<Item = &'c CatalogItem> + 'c {
        ids.iter().filter_map(|id| self.get(id))
    }

    fn ensure_known(&self, ids: &[CatalogItemId]) -> Result<(), CatalogError> {
        match ids.iter().find(|id| !self.index.contains_key(*id)) {
            Some(unknown) => Err(CatalogError::UnknownItem(unknown.clone())),
            None => Ok(()),
        }
    }
}

impl CatalogProvider for Catalog {
    fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    fn get(&self, id: &CatalogItemId) -> Option<&CatalogItem> {
        self.index.get(id).and_then(|&idx| self.items.get(idx))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn dorayaki() -> Result<CatalogItem, CatalogError> {
        CatalogItem::new("1", "Magical Dorayaki", Money::from_minor(350, USD), "dorayaki.png")
    }

    #[test]
    fn negative_price_is_rejected() {
        let result = CatalogItem::new("x", "Refund Bun", Money::from_minor(-1, USD), "");

        assert_eq!(result, Err(CatalogError::NegativePrice("x".into())));
    }

    #[test]
    fn free_items_are_allowed() -> TestResult {
        let item = CatalogItem::new("free", "Water", Money::from_minor(0, USD), "")?;

        assert_eq!(item.price().to_minor_units(), 0);

        Ok(())
    }

    #[test]
    fn insert_and_get() -> TestResult {
        let mut catalog = Catalog::new(USD);

        catalog.insert(dorayaki()?)?;

        let item = catalog.get(&"1".into());

        assert_eq!(item.map(CatalogItem::name), Some("Magical Dorayaki"));
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() -> TestResult {
        let mut catalog = Catalog::new(USD);

        catalog.insert(dorayaki()?)?;

        assert_eq!(
            catalog.insert(dorayaki()?),
            Err(CatalogError::DuplicateId("1".into()))
        );

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected() -> TestResult {
        let mut catalog = Catalog::new(GBP);

        assert_eq!(
            catalog.insert(dorayaki()?),
            Err(CatalogError::CurrencyMismatch(
                "1".into(),
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );

        Ok(())
    }

    #[test]
    fn sections_must_reference_known_items() -> TestResult {
        let mut catalog = Catalog::new(USD);

        catalog.insert(dorayaki()?)?;

        assert_eq!(
            catalog.set_specials(vec!["1".into(), "2".into()]),
            Err(CatalogError::UnknownItem("2".into()))
        );

        catalog.set_bestsellers(vec!["1".into()])?;

        let names: Vec<&str> = catalog.bestsellers().map(CatalogItem::name).collect();

        assert_eq!(names, vec!["Magical Dorayaki"]);

        Ok(())
    }

    #[test]
    fn category_items_resolve_in_order() -> TestResult {
        let mut catalog = Catalog::new(USD);

        catalog.insert(dorayaki()?)?;
        catalog.insert(CatalogItem::new(
            "2",
            "Anywhere Door Pizza Slice",
            Money::from_minor(500, USD),
            "pizza.png",
        )?)?;

        catalog.push_category(MenuCategory {
            name: "Mains".to_string(),
            item_ids: vec!["2".into(), "1".into()],
        })?;

        let category = catalog.categories().first().ok_or("missing category")?;
        let ids: Vec<&str> = catalog
            .category_items(category)
            .map(|item| item.id().as_str())
            .collect();

        assert_eq!(ids, vec!["2", "1"]);

        Ok(())
    }
}
