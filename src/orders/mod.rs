//! Orders
//!
//! An [`Order`] is an immutable snapshot of a cart taken at the moment checkout succeeds.
//! Later changes to the cart or the catalog never reach a placed order.

use std::time::Duration;

use smallvec::SmallVec;

use crate::{
    cart::Cart,
    catalog::CatalogItemId,
    checkout::{CheckoutSubmission, PaymentMethod, ShippingAddress},
    notifications::Notifier,
    pricing::{Price, line_total},
};

mod ids;

pub use ids::{
    DEFAULT_ORDER_PREFIX, OrderId, OrderIdGenerator, RandomOrderIds, SequentialOrderIds,
};

/// A purchased line, copied out of the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Item id
    pub item_id: CatalogItemId,

    /// Item name at the time of purchase
    pub name: String,

    /// Units purchased
    pub quantity: u32,

    /// Unit price at the time of purchase
    pub unit_price: Price,
}

impl OrderLine {
    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Price {
        line_total(&self.unit_price, self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    lines: SmallVec<[OrderLine; 8]>,
    subtotal: Price,
    shipping: Price,
    total: Price,
    estimated_delivery: Duration,
    address: ShippingAddress,
    payment_method: PaymentMethod,
}

impl Order {
    /// Order id
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Purchased lines, in cart order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of line totals at the time of purchase.
    pub fn subtotal(&self) -> &Price {
        &self.subtotal
    }

    /// Shipping charged.
    pub fn shipping(&self) -> &Price {
        &self.shipping
    }

    /// Amount charged: subtotal plus shipping.
    pub fn total(&self) -> &Price {
        &self.total
    }

    /// Time until delivery.
    pub fn estimated_delivery(&self) -> Duration {
        self.estimated_delivery
    }

    /// Name the order is addressed to.
    pub fn customer_name(&self) -> &str {
        &self.address.full_name
    }

    /// Delivery address
    pub fn address(&self) -> &ShippingAddress {
        &self.address
    }

    /// How the order was paid.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Total number of units.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Delivery estimate as shown on the confirmation page.
    pub fn delivery_estimate_label(&self) -> String {
        let minutes = self.estimated_delivery.as_secs() / 60;
        let unit = if minutes == 1 { "minute" } else { "minutes" };

        format!("approx. {minutes} {unit} (via Time Furoshiki Express!)")
    }
}

/// Snapshot a cart into an order.
///
/// Inputs are expected to be validated already; nothing is checked here.
#[tracing::instrument(
    name = "orders.build_order",
    skip_all,
    fields(
        order_id = tracing::field::Empty,
        lines = cart.len(),
        payment_method = submission.payment.method().as_str()
    )
)]
pub fn build_order<N: Notifier, G: OrderIdGenerator + ?Sized>(
    cart: &Cart<N>,
    submission: &CheckoutSubmission,
    ids: &mut G,
    estimated_delivery: Duration,
) -> Order {
    let id = ids.next_id();

    tracing::Span::current().record("order_id", id.as_str());

    let lines = cart
        .lines()
        .iter()
        .map(|line| OrderLine {
            item_id: line.id().clone(),
            name: line.name().to_string(),
            quantity: line.quantity().get(),
            unit_price: *line.unit_price(),
        })
        .collect();

    let order = Order {
        id,
        lines,
        subtotal: cart.subtotal(),
        shipping: cart.shipping_fee(),
        total: cart.total(),
        estimated_delivery,
        address: submission.address.clone(),
        payment_method: submission.payment.method(),
    };

    tracing::info!(total = %order.total, items = order.item_count(), "order built");

    order
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::CatalogItem,
        checkout::PaymentSelection,
        notifications::NotificationLog,
    };

    use super::*;

    fn submission() -> CheckoutSubmission {
        CheckoutSubmission {
            address: ShippingAddress {
                full_name: "Nobita Nobi".to_string(),
                street_address: "1-2-3 Future Street".to_string(),
                apartment_suite: None,
                city: "Neo Tokyo".to_string(),
                state_province: "Tokyo".to_string(),
                zip_code: "123-4567".to_string(),
                country: "Japan".to_string(),
                phone_number: None,
            },
            payment: PaymentSelection::DoraPay,
        }
    }

    #[test]
    fn order_copies_cart_totals_and_lines() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(Money::from_minor(500, USD), &log);

        cart.add_or_increment(
            &CatalogItem::new("1", "Magical Dorayaki", Money::from_minor(350, USD), "")?,
            2,
        )?;
        cart.add_or_increment(
            &CatalogItem::new("2", "Anywhere Door Pizza Slice", Money::from_minor(500, USD), "")?,
            1,
        )?;

        let mut ids = SequentialOrderIds::new("DORA", 10_000);
        let order = build_order(&cart, &submission(), &mut ids, Duration::from_secs(30 * 60));

        assert_eq!(order.id().as_str(), "DORA10000");
        assert_eq!(order.subtotal(), &Money::from_minor(1200, USD));
        assert_eq!(order.shipping(), &Money::from_minor(500, USD));
        assert_eq!(order.total(), &Money::from_minor(1700, USD));
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.customer_name(), "Nobita Nobi");
        assert_eq!(order.payment_method(), PaymentMethod::DoraPay);

        let names: Vec<&str> = order.lines().iter().map(|line| line.name.as_str()).collect();

        assert_eq!(names, ["Magical Dorayaki", "Anywhere Door Pizza Slice"]);

        Ok(())
    }

    #[test]
    fn order_is_isolated_from_later_cart_changes() -> TestResult {
        let log = NotificationLog::new();
        let mut cart = Cart::new(Money::from_minor(500, USD), &log);
        let id = CatalogItemId::from("1");

        cart.add_or_increment(
            &CatalogItem::new("1", "Magical Dorayaki", Money::from_minor(350, USD), "")?,
            2,
        )?;

        let mut ids = SequentialOrderIds::new("DORA", 1);
        let order = build_order(&cart, &submission(), &mut ids, Duration::ZERO);
        let before = order.clone();

        cart.set_quantity(&id, 9);
        cart.clear();

        assert_eq!(order, before);
        assert_eq!(order.total(), &Money::from_minor(1200, USD));
        assert_eq!(
            order.lines().first().map(OrderLine::line_total),
            Some(Money::from_minor(700, USD))
        );

        Ok(())
    }

    #[test]
    fn delivery_label_spells_out_minutes() {
        let label = |minutes: u64| {
            build_order(
                &Cart::new(Money::from_minor(500, USD), NotificationLog::new()),
                &submission(),
                &mut SequentialOrderIds::new("DORA", 1),
                Duration::from_secs(minutes * 60),
            )
            .delivery_estimate_label()
        };

        assert_eq!(label(30), "approx. 30 minutes (via Time Furoshiki Express!)");
        assert_eq!(label(1), "approx. 1 minute (via Time Furoshiki Express!)");
    }
}
