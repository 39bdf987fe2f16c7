//! Pocket
//!
//! Pocket is the cart, checkout and order engine behind a themed food-ordering storefront:
//! catalog data, the shopper's pocket (cart), checkout validation and order snapshots.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod navigation;
pub mod notifications;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod render;
