//! Navigation

use std::{cell::RefCell, fmt, rc::Rc};

use mockall::automock;
use tracing::info;

use crate::{catalog::CatalogItemId, orders::Order};

/// A storefront page.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Homepage with bestsellers
    Home,

    /// Menu categories
    Menu,

    /// Daily specials
    Specials,

    /// Item detail
    Item(CatalogItemId),

    /// Cart
    Cart,

    /// Checkout form
    Checkout,

    /// Confirmation of a placed order, carrying the order snapshot
    OrderConfirmation(Box<Order>),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Menu => f.write_str("/menu"),
            Route::Specials => f.write_str("/daily-specials"),
            Route::Item(id) => write!(f, "/food-item/{id}"),
            Route::Cart => f.write_str("/cart"),
            Route::Checkout => f.write_str("/checkout"),
            Route::OrderConfirmation(_) => f.write_str("/order-confirmation"),
        }
    }
}

/// Moves the shopper between pages.
#[automock]
pub trait Navigator {
    /// Transition to `route`.
    fn navigate(&self, route: Route);
}

impl<V: Navigator + ?Sized> Navigator for &V {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}

impl<V: Navigator + ?Sized> Navigator for Rc<V> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}

/// Logs navigation through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        info!(%route, "navigating");
    }
}

/// Records every route it is asked to visit.
#[derive(Debug, Default)]
pub struct NavigationLog {
    visited: RefCell<Vec<Route>>,
}

impl NavigationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of every visited route, oldest first.
    pub fn visited(&self) -> Vec<Route> {
        self.visited.borrow().clone()
    }

    /// The route most recently navigated to.
    pub fn current(&self) -> Option<Route> {
        self.visited.borrow().last().cloned()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, route: Route) {
        self.visited.borrow_mut().push(route);
    }
}
