//! Cart
//!
//! The shopper's pocket: one line per catalog item, with derived subtotal, shipping and total.
//! Every mutating call raises exactly one [`Notification`] through the cart's [`Notifier`].

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{CatalogItem, CatalogItemId},
    notifications::{Notification, Notifier, TracingNotifier},
    pricing::{Price, line_total, total_price, zero},
};

mod quantity;

pub use quantity::{Quantity, parse_quantity_input};

/// Errors related to cart construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (item, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(CatalogItemId, &'static str, &'static str),
}

/// One catalog item and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item: CatalogItem,
    quantity: Quantity,
}

impl CartLine {
    /// Create a line.
    pub fn new(item: CatalogItem, quantity: Quantity) -> Self {
        Self { item, quantity }
    }

    /// The item, as it was when first added.
    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// Item id
    pub fn id(&self) -> &CatalogItemId {
        self.item.id()
    }

    /// Item name
    pub fn name(&self) -> &str {
        self.item.name()
    }

    /// Unit price
    pub fn unit_price(&self) -> &Price {
        self.item.price()
    }

    /// Quantity
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    pub fn subtotal(&self) -> Price {
        line_total(self.item.price(), self.quantity.get())
    }
}

/// Outcome of a quantity change.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityChange {
    /// The line now has a different quantity.
    Updated {
        /// Quantity before the change
        previous: Quantity,

        /// Quantity after the change
        current: Quantity,
    },

    /// The quantity dropped below one and the line was deleted.
    Removed(CartLine),

    /// No line exists for the item.
    Missing,
}

/// Cart
#[derive(Debug)]
pub struct Cart<N: Notifier = TracingNotifier> {
    lines: Vec<CartLine>,
    currency: &'static Currency,
    shipping_fee: Price,
    notifier: N,
}

impl<N: Notifier> Cart<N> {
    /// Create an empty cart. The cart currency is the currency of `shipping_fee`.
    pub fn new(shipping_fee: Price, notifier: N) -> Self {
        Cart {
            lines: Vec::new(),
            currency: shipping_fee.currency(),
            shipping_fee,
            notifier,
        }
    }

    /// Create a cart pre-seeded with lines. Seeding raises no notifications, and repeated
    /// items are merged into one line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if an item is not priced in the cart currency.
    pub fn with_lines(
        shipping_fee: Price,
        lines: impl IntoIterator<Item = (CatalogItem, Quantity)>,
        notifier: N,
    ) -> Result<Self, CartError> {
        let mut cart = Self::new(shipping_fee, notifier);

        for (item, quantity) in lines {
            cart.ensure_currency(&item)?;
            cart.merge(&item, quantity);
        }

        Ok(cart)
    }

    /// Add `quantity` of an item, incrementing its line if one exists. Quantities below one are
    /// treated as one. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the item is not priced in the cart currency.
    pub fn add_or_increment(
        &mut self,
        item: &CatalogItem,
        quantity: i64,
    ) -> Result<Quantity, CartError> {
        self.ensure_currency(item)?;

        let added = Quantity::clamped(quantity);
        let current = self.merge(item, added);

        debug!(item = %item.id(), %added, %current, "added to cart");

        self.notifier.notify(Notification::success(
            "Hooray! Item Added!",
            format!(
                "{} (x{added}) has been magically placed in your Pocket (Cart)!",
                item.name()
            ),
        ));

        Ok(current)
    }

    /// Replace the quantity of a line. Quantities below one delete the line.
    pub fn set_quantity(&mut self, id: &CatalogItemId, quantity: i64) -> QuantityChange {
        if quantity < 1 {
            return match self.remove_with_message(id, Some("Item quantity reduced to zero.")) {
                Some(line) => QuantityChange::Removed(line),
                None => QuantityChange::Missing,
            };
        }

        let current = Quantity::clamped(quantity);

        let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) else {
            debug!(item = %id, "quantity change for item not in cart");

            return QuantityChange::Missing;
        };

        let previous = line.quantity;
        line.quantity = current;

        debug!(item = %id, %previous, %current, "cart quantity updated");

        let message = format!("{} quantity set to {current}.", line.name());

        self.notifier
            .notify(Notification::info("Quantity Updated", message));

        QuantityChange::Updated { previous, current }
    }

    /// Replace the quantity of a line from text typed by the shopper.
    ///
    /// See [`parse_quantity_input`] for how the text is interpreted.
    pub fn set_quantity_input(&mut self, id: &CatalogItemId, input: &str) -> QuantityChange {
        self.set_quantity(id, parse_quantity_input(input))
    }

    /// Add one to a line's quantity.
    pub fn increment(&mut self, id: &CatalogItemId) -> QuantityChange {
        match self.line(id) {
            Some(line) => {
                let next = i64::from(line.quantity.get()).saturating_add(1);
                self.set_quantity(id, next)
            }
            None => QuantityChange::Missing,
        }
    }

    /// Subtract one from a line's quantity, deleting the line when it reaches zero.
    pub fn decrement(&mut self, id: &CatalogItemId) -> QuantityChange {
        match self.line(id) {
            Some(line) => {
                let next = i64::from(line.quantity.get()) - 1;
                self.set_quantity(id, next)
            }
            None => QuantityChange::Missing,
        }
    }

    /// Delete a line. The removal is announced even when the item was not in the cart.
    pub fn remove_line(&mut self, id: &CatalogItemId) -> Option<CartLine> {
        self.remove_with_message(id, None)
    }

    /// Delete every line. Returns the number of lines removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();

        self.lines.clear();

        debug!(removed, "cart cleared");

        self.notifier.notify(Notification::info(
            "Pocket Emptied",
            "Your pocket is ready for a new adventure.",
        ));

        removed
    }

    /// Sum of unit price times quantity over every line.
    pub fn subtotal(&self) -> Price {
        let line_totals: Vec<Price> = self.lines.iter().map(CartLine::subtotal).collect();

        total_price(self.currency, &line_totals)
    }

    /// Flat delivery fee, charged only when the cart has at least one line.
    pub fn shipping_fee(&self) -> Price {
        if self.is_empty() {
            zero(self.currency)
        } else {
            self.shipping_fee
        }
    }

    /// Subtotal plus shipping.
    pub fn total(&self) -> Price {
        let minor_units = self
            .subtotal()
            .to_minor_units()
            .saturating_add(self.shipping_fee().to_minor_units());

        Money::from_minor(minor_units, self.currency)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for an item.
    pub fn line(&self, id: &CatalogItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across every line.
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Cart currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The notifier this cart reports to.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn ensure_currency(&self, item: &CatalogItem) -> Result<(), CartError> {
        let item_currency = item.price().currency();

        if item_currency == self.currency {
            Ok(())
        } else {
            Err(CartError::CurrencyMismatch(
                item.id().clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ))
        }
    }

    fn merge(&mut self, item: &CatalogItem, quantity: Quantity) -> Quantity {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == item.id()) {
            line.quantity = line.quantity.saturating_add(quantity);

            return line.quantity;
        }

        self.lines.push(CartLine::new(item.clone(), quantity));

        quantity
    }

    fn remove_with_message(
        &mut self,
        id: &CatalogItemId,
        message: Option<&str>,
    ) -> Option<CartLine> {
        let position = self.lines.iter().position(|line| line.id() == id);
        let removed = position.map(|idx| self.lines.remove(idx));

        debug!(item = %id, found = removed.is_some(), "removed from cart");

        let message = match message {
            Some(message) => message.to_string(),
            None => format!(
                "{} removed from your pocket.",
                removed.as_ref().map_or("Item", CartLine::name)
            ),
        };

        self.notifier
            .notify(Notification::destructive("Item Removed!", message));

        removed
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::notifications::{MockNotifier, NotificationLog, Severity};

    use super::*;

    fn item(id: &str, name: &str, minor: i64) -> Result<CatalogItem, crate::catalog::CatalogError> {
        CatalogItem::new(id, name, Money::from_minor(minor, USD), "")
    }

    fn fee() -> Price {
        Money::from_minor(500, USD)
    }

    #[test]
    fn new_cart_is_empty_and_free() {
        let cart = Cart::new(fee(), NotificationLog::new());

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), zero(USD));
        assert_eq!(cart.shipping_fee(), zero(USD));
        assert_eq!(cart.total(), zero(USD));
        assert_eq!(cart.currency(), USD);
    }

    #[test]
    fn subtotal_and_total_follow_lines() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 2)?;
        cart.add_or_increment(&item("2", "Anywhere Door Pizza Slice", 500)?, 1)?;

        assert_eq!(cart.subtotal(), Money::from_minor(1200, USD));
        assert_eq!(cart.shipping_fee(), fee());
        assert_eq!(cart.total(), Money::from_minor(1700, USD));
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn adding_twice_increments_one_line() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);
        let dorayaki = item("1", "Magical Dorayaki", 350)?;

        cart.add_or_increment(&dorayaki, 1)?;
        let quantity = cart.add_or_increment(&dorayaki, 2)?;

        assert_eq!(quantity.get(), 3);
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn add_clamps_quantity_to_one() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        let quantity = cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, -4)?;

        assert_eq!(quantity, Quantity::ONE);

        Ok(())
    }

    #[test]
    fn add_announces_the_item() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 2)?;

        assert_eq!(
            log.last(),
            Some(Notification::success(
                "Hooray! Item Added!",
                "Magical Dorayaki (x2) has been magically placed in your Pocket (Cart)!"
            ))
        );

        Ok(())
    }

    #[test]
    fn add_rejects_foreign_currency() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);
        let scone = CatalogItem::new("gb", "Scone", Money::from_minor(200, GBP), "")?;

        assert_eq!(
            cart.add_or_increment(&scone, 1),
            Err(CartError::CurrencyMismatch(
                "gb".into(),
                GBP.iso_alpha_code,
                USD.iso_alpha_code
            ))
        );
        assert!(log.is_empty());

        Ok(())
    }

    #[test]
    fn set_quantity_replaces() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);
        let id = CatalogItemId::from("1");

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 2)?;

        let change = cart.set_quantity(&id, 5);

        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: Quantity::clamped(2),
                current: Quantity::clamped(5),
            }
        );
        assert_eq!(cart.subtotal(), Money::from_minor(1750, USD));

        Ok(())
    }

    #[test]
    fn set_quantity_below_one_removes_line() -> TestResult {
        for quantity in [0, -1] {
            let log = NotificationLog::new();
            let mut cart = Cart::new(fee(), &log);
            let id = CatalogItemId::from("1");

            cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 2)?;

            let change = cart.set_quantity(&id, quantity);

            assert!(matches!(change, QuantityChange::Removed(_)));
            assert!(cart.line(&id).is_none());
            assert_eq!(
                log.last(),
                Some(Notification::destructive(
                    "Item Removed!",
                    "Item quantity reduced to zero."
                ))
            );
        }

        Ok(())
    }

    #[test]
    fn set_quantity_on_missing_item_is_silent() {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        let change = cart.set_quantity(&"nope".into(), 3);

        assert_eq!(change, QuantityChange::Missing);
        assert!(log.is_empty());
    }

    #[test]
    fn set_quantity_input_coerces_text() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);
        let id = CatalogItemId::from("1");

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 4)?;

        cart.set_quantity_input(&id, "abc");
        assert_eq!(cart.line(&id).map(CartLine::quantity), Some(Quantity::ONE));

        cart.set_quantity_input(&id, "-3");
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn decrement_from_one_removes_line() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);
        let id = CatalogItemId::from("1");

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 1)?;
        cart.increment(&id);

        assert_eq!(cart.line(&id).map(|line| line.quantity().get()), Some(2));

        cart.decrement(&id);
        cart.decrement(&id);

        assert!(cart.is_empty());
        assert_eq!(cart.shipping_fee(), zero(USD));

        Ok(())
    }

    #[test]
    fn remove_line_names_the_item() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        cart.add_or_increment(&item("2", "Anywhere Door Pizza Slice", 500)?, 1)?;

        let removed = cart.remove_line(&"2".into());

        assert_eq!(
            removed.as_ref().map(CartLine::name),
            Some("Anywhere Door Pizza Slice")
        );

        let last = log.last().ok_or("no notification")?;

        assert_eq!(last.message, "Anywhere Door Pizza Slice removed from your pocket.");
        assert_eq!(last.severity, Severity::Destructive);

        Ok(())
    }

    #[test]
    fn remove_missing_line_still_announces() {
        let log = NotificationLog::new();
        let mut cart = Cart::new(fee(), &log);

        assert!(cart.remove_line(&"ghost".into()).is_none());
        assert_eq!(
            log.last().map(|n| n.message),
            Some("Item removed from your pocket.".to_string())
        );
    }

    #[test]
    fn with_lines_merges_and_stays_quiet() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let dorayaki = item("1", "Magical Dorayaki", 350)?;

        let cart = Cart::with_lines(
            fee(),
            [
                (dorayaki.clone(), Quantity::clamped(2)),
                (dorayaki, Quantity::ONE),
            ],
            notifier,
        )?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn every_mutation_notifies_once() -> TestResult {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(5).return_const(());

        let mut cart = Cart::new(fee(), notifier);
        let id = CatalogItemId::from("1");

        cart.add_or_increment(&item("1", "Magical Dorayaki", 350)?, 1)?;
        cart.set_quantity(&id, 3);
        cart.set_quantity(&id, 0);
        cart.remove_line(&id);
        cart.clear();

        Ok(())
    }
}
