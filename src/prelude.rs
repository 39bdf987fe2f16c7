//! Pocket prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine, Quantity, QuantityChange, parse_quantity_input},
    catalog::{
        Catalog, CatalogError, CatalogItem, CatalogItemId, CatalogProvider, ItemDetail,
        MenuCategory,
    },
    checkout::{
        CheckoutError, CheckoutFlow, CheckoutForm, CheckoutSettings, CheckoutSubmission, Field,
        FieldErrors, PaymentMethod, PaymentSelection, Processing, ShippingAddress, validate,
    },
    config::{ConfigError, StorefrontConfig},
    fixtures::{Fixture, FixtureError},
    navigation::{NavigationLog, Navigator, Route, TracingNavigator},
    notifications::{Notification, NotificationLog, Notifier, Severity, TracingNotifier},
    orders::{
        Order, OrderId, OrderIdGenerator, OrderLine, RandomOrderIds, SequentialOrderIds,
        build_order,
    },
    pricing::Price,
    render::RenderError,
};
