//! Simulated order submission

use std::{
    cell::{Cell, RefCell},
    time::Duration,
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    checkout::{CheckoutForm, FieldErrors, validate},
    navigation::{Navigator, Route, TracingNavigator},
    notifications::{Notification, Notifier, TracingNotifier},
    orders::{Order, OrderIdGenerator, RandomOrderIds, build_order},
};

/// Errors that stop a checkout submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Another submission is still processing.
    #[error("An order is already being processed")]
    AlreadyProcessing,

    /// There is nothing in the cart to order.
    #[error("Your pocket is empty")]
    EmptyCart,

    /// One or more form fields failed validation.
    #[error(transparent)]
    Invalid(#[from] FieldErrors),
}

/// Timing and cart policy for checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSettings {
    /// Simulated processing time before the confirmation page.
    pub processing_delay: Duration,

    /// Delivery estimate stamped on each order.
    pub delivery_estimate: Duration,

    /// Empty the cart once an order is placed.
    pub clear_cart_on_order: bool,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(1500),
            delivery_estimate: Duration::from_secs(30 * 60),
            clear_cart_on_order: true,
        }
    }
}

/// Drives a checkout from form submission to the confirmation page.
///
/// Only one submission may be processing at a time.
#[derive(Debug)]
pub struct CheckoutFlow<
    N: Notifier = TracingNotifier,
    V: Navigator = TracingNavigator,
    G: OrderIdGenerator = RandomOrderIds,
> {
    notifier: N,
    navigator: V,
    ids: RefCell<G>,
    processing: Cell<bool>,
    settings: CheckoutSettings,
}

impl<N: Notifier, V: Navigator, G: OrderIdGenerator> CheckoutFlow<N, V, G> {
    /// Create a flow.
    pub fn new(notifier: N, navigator: V, ids: G, settings: CheckoutSettings) -> Self {
        Self {
            notifier,
            navigator,
            ids: RefCell::new(ids),
            processing: Cell::new(false),
            settings,
        }
    }

    /// Check if a submission is in flight. The submit control is disabled while this holds.
    pub fn is_processing(&self) -> bool {
        self.processing.get()
    }

    /// Settings in use
    pub fn settings(&self) -> &CheckoutSettings {
        &self.settings
    }

    /// Validate the form and place the order.
    ///
    /// The returned [`Processing`] keeps the flow locked until it completes or is dropped. A placed
    /// order is always confirmed: dropping it before the delay has passed navigates straight to the
    /// confirmation page.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadyProcessing`] while another submission is in flight,
    /// [`CheckoutError::EmptyCart`] when the cart has no lines and
    /// [`CheckoutError::Invalid`] when the form fails validation.
    #[tracing::instrument(
        name = "checkout.begin",
        skip_all,
        fields(lines = cart.len()),
        err(level = "debug")
    )]
    pub fn begin<C: Notifier>(
        &self,
        cart: &mut Cart<C>,
        form: &CheckoutForm,
    ) -> Result<Processing<'_, V>, CheckoutError> {
        if self.processing.get() {
            return Err(CheckoutError::AlreadyProcessing);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let submission = validate(form)?;

        let order = build_order(
            cart,
            &submission,
            &mut *self.ids.borrow_mut(),
            self.settings.delivery_estimate,
        );

        if self.settings.clear_cart_on_order {
            cart.clear();
        }

        self.processing.set(true);

        info!(order_id = %order.id(), "order processing");

        self.notifier.notify(Notification::success(
            "Order Processing!",
            "Your magical order is being prepared with Doraemon's special touch!",
        ));

        Ok(Processing {
            guard: ProcessingGuard {
                flag: &self.processing,
                navigator: &self.navigator,
                pending: Some(order.clone()),
            },
            order,
            delay: self.settings.processing_delay,
        })
    }

    /// Validate, place the order, wait out the processing delay and show the confirmation.
    ///
    /// # Errors
    ///
    /// See [`CheckoutFlow::begin`].
    pub async fn submit<C: Notifier>(
        &self,
        cart: &mut Cart<C>,
        form: &CheckoutForm,
    ) -> Result<Order, CheckoutError> {
        let processing = self.begin(cart, form)?;

        Ok(processing.complete().await)
    }
}

/// A placed order waiting out its processing delay.
#[derive(Debug)]
#[must_use = "dropping this confirms the order without waiting out the processing delay"]
pub struct Processing<'f, V: Navigator> {
    order: Order,
    delay: Duration,
    guard: ProcessingGuard<'f, V>,
}

impl<V: Navigator> Processing<'_, V> {
    /// The order being processed.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Wait for the processing delay, then navigate to the confirmation page.
    pub async fn complete(self) -> Order {
        let Processing {
            order,
            delay,
            mut guard,
        } = self;

        tokio::time::sleep(delay).await;

        guard.confirm();
        drop(guard);

        order
    }
}

/// Unlocks the flow on drop, confirming the order first if that has not happened yet.
#[derive(Debug)]
struct ProcessingGuard<'f, V: Navigator> {
    flag: &'f Cell<bool>,
    navigator: &'f V,
    pending: Option<Order>,
}

impl<V: Navigator> ProcessingGuard<'_, V> {
    fn confirm(&mut self) {
        if let Some(order) = self.pending.take() {
            debug!(order_id = %order.id(), "order confirmed");

            self.navigator.navigate(Route::OrderConfirmation(Box::new(order)));
        }
    }
}

impl<V: Navigator> Drop for ProcessingGuard<'_, V> {
    fn drop(&mut self) {
        if let Some(order) = &self.pending {
            warn!(order_id = %order.id(), "processing cut short, confirming early");
        }

        self.confirm();
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::CatalogItem,
        checkout::Field,
        navigation::{MockNavigator, NavigationLog},
        notifications::NotificationLog,
        orders::SequentialOrderIds,
    };

    use super::*;

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Nobita Nobi".to_string(),
            street_address: "1-2-3 Future Street".to_string(),
            city: "Neo Tokyo".to_string(),
            state_province: "Tokyo".to_string(),
            zip_code: "123-4567".to_string(),
            payment_method: Some("gadgetWallet".to_string()),
            ..CheckoutForm::default()
        }
    }

    fn cart(log: &NotificationLog) -> Result<Cart<&NotificationLog>, Box<dyn std::error::Error>> {
        let mut cart = Cart::new(Money::from_minor(500, USD), log);

        cart.add_or_increment(
            &CatalogItem::new("1", "Magical Dorayaki", Money::from_minor(350, USD), "")?,
            2,
        )?;

        Ok(cart)
    }

    fn flow<'a>(
        notifications: &'a NotificationLog,
        routes: &'a NavigationLog,
    ) -> CheckoutFlow<&'a NotificationLog, &'a NavigationLog, SequentialOrderIds> {
        CheckoutFlow::new(
            notifications,
            routes,
            SequentialOrderIds::new("DORA", 10_000),
            CheckoutSettings::default(),
        )
    }

    #[test]
    fn empty_cart_is_rejected() {
        let notifications = NotificationLog::new();
        let routes = NavigationLog::new();
        let mut cart = Cart::new(Money::from_minor(500, USD), &notifications);

        let flow = flow(&notifications, &routes);
        let result = flow.begin(&mut cart, &form());

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(!flow.is_processing());
    }

    #[test]
    fn invalid_form_keeps_cart_and_flow_idle() -> TestResult {
        let notifications = NotificationLog::new();
        let routes = NavigationLog::new();
        let mut cart = cart(&notifications)?;
        let flow = flow(&notifications, &routes);

        let bad = CheckoutForm {
            full_name: "N".to_string(),
            ..form()
        };

        let Err(CheckoutError::Invalid(errors)) = flow.begin(&mut cart, &bad) else {
            return Err("expected validation errors".into());
        };

        assert!(errors.contains(Field::FullName));
        assert!(!flow.is_processing());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn begin_locks_until_guard_drops() -> TestResult {
        let notifications = NotificationLog::new();
        let routes = NavigationLog::new();
        let mut cart = cart(&notifications)?;
        let flow = flow(&notifications, &routes);

        let processing = flow.begin(&mut cart, &form())?;

        assert!(flow.is_processing());
        assert!(cart.is_empty());
        assert!(matches!(
            flow.begin(&mut cart, &form()),
            Err(CheckoutError::AlreadyProcessing)
        ));

        drop(processing);

        assert!(!flow.is_processing());
        assert!(matches!(
            routes.current(),
            Some(Route::OrderConfirmation(order)) if order.id().as_str() == "DORA10000"
        ));

        Ok(())
    }

    #[test]
    fn begin_announces_processing() -> TestResult {
        let notifications = NotificationLog::new();
        let routes = NavigationLog::new();
        let mut cart = cart(&notifications)?;
        let flow = flow(&notifications, &routes);

        let processing = flow.begin(&mut cart, &form())?;

        assert_eq!(processing.order().id().as_str(), "DORA10000");
        assert_eq!(
            notifications.last().map(|n| n.title),
            Some("Order Processing!".to_string())
        );
        assert!(routes.visited().is_empty());

        Ok(())
    }

    #[test]
    fn cart_can_be_kept_after_order() -> TestResult {
        let notifications = NotificationLog::new();
        let routes = NavigationLog::new();
        let mut cart = cart(&notifications)?;

        let flow = CheckoutFlow::new(
            &notifications,
            &routes,
            SequentialOrderIds::new("DORA", 1),
            CheckoutSettings {
                clear_cart_on_order: false,
                ..CheckoutSettings::default()
            },
        );

        let _processing = flow.begin(&mut cart, &form())?;

        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn complete_waits_then_navigates() -> TestResult {
        let notifications = NotificationLog::new();
        let mut navigator = MockNavigator::new();

        navigator
            .expect_navigate()
            .withf(|route| matches!(route, Route::OrderConfirmation(order) if order.id().as_str() == "DORA10000"))
            .times(1)
            .return_const(());

        let mut cart = cart(&notifications)?;
        let flow = CheckoutFlow::new(
            &notifications,
            navigator,
            SequentialOrderIds::new("DORA", 10_000),
            CheckoutSettings::default(),
        );

        let started = tokio::time::Instant::now();
        let order = flow.submit(&mut cart, &form()).await?;

        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(order.total(), &Money::from_minor(1200, USD));
        assert!(!flow.is_processing());

        Ok(())
    }
}
