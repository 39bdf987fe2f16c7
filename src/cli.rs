//! Command handlers

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Args;

use pocket::{
    cart::{Cart, parse_quantity_input},
    catalog::{CatalogItemId, CatalogProvider},
    checkout::{CheckoutError, CheckoutFlow, CheckoutForm, FieldErrors},
    config::StorefrontConfig,
    fixtures::Fixture,
    navigation::NavigationLog,
    notifications::NotificationLog,
    render,
};

#[derive(Debug, Args)]
pub(crate) struct ItemArgs {
    /// Item id
    id: String,
}

#[derive(Debug, Args)]
pub(crate) struct CartArgs {
    /// Add an item, optionally with a quantity (`ID` or `ID=QTY`)
    #[arg(long = "add", value_name = "ID[=QTY]", value_parser = parse_addition)]
    additions: Vec<Addition>,

    /// Start from an empty cart instead of the seeded one
    #[arg(long)]
    empty: bool,
}

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Checkout form values (YAML, camelCase field names)
    #[arg(long)]
    form: PathBuf,

    /// Print field errors as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    cart: CartArgs,
}

#[derive(Debug, Clone)]
struct Addition {
    id: CatalogItemId,
    quantity: i64,
}

fn parse_addition(value: &str) -> Result<Addition, String> {
    let (id, quantity) = match value.split_once('=') {
        Some((id, quantity)) => (id, parse_quantity_input(quantity)),
        None => (value, 1),
    };

    if id.is_empty() {
        return Err("item id is empty".to_string());
    }

    Ok(Addition {
        id: CatalogItemId::new(id),
        quantity,
    })
}

pub(crate) fn home(config: &StorefrontConfig) -> Result<()> {
    let fixture = config.load_fixture()?;

    render::write_items(
        io::stdout().lock(),
        "Doraemon's Bestsellers",
        fixture.catalog().bestsellers(),
    )?;

    Ok(())
}

pub(crate) fn menu(config: &StorefrontConfig) -> Result<()> {
    let fixture = config.load_fixture()?;
    let catalog = fixture.catalog();
    let mut out = io::stdout().lock();

    for category in catalog.categories() {
        render::write_items(&mut out, &category.name, catalog.category_items(category))?;
    }

    Ok(())
}

pub(crate) fn specials(config: &StorefrontConfig) -> Result<()> {
    let fixture = config.load_fixture()?;

    render::write_items(
        io::stdout().lock(),
        "Today's Magical Specials",
        fixture.catalog().specials(),
    )?;

    Ok(())
}

pub(crate) fn item(config: &StorefrontConfig, args: &ItemArgs) -> Result<()> {
    let fixture = config.load_fixture()?;
    let catalog = fixture.catalog();
    let id = CatalogItemId::new(args.id.as_str());

    let item = catalog
        .get(&id)
        .ok_or_else(|| anyhow!("Unknown item: {id}"))?;

    render::write_item_detail(io::stdout().lock(), item, catalog.detail(&id))?;

    Ok(())
}

pub(crate) fn cart(config: &StorefrontConfig, args: &CartArgs) -> Result<()> {
    let fixture = config.load_fixture()?;
    let notifications = NotificationLog::new();
    let cart = build_cart(config, &fixture, args, &notifications)?;
    let mut out = io::stdout().lock();

    write_notifications(&mut out, &notifications)?;
    render::write_cart(&mut out, &cart)?;

    Ok(())
}

pub(crate) async fn checkout(config: &StorefrontConfig, args: &CheckoutArgs) -> Result<()> {
    let contents = fs::read_to_string(&args.form)
        .with_context(|| format!("Failed to read form {}", args.form.display()))?;

    let form: CheckoutForm = serde_norway::from_str(&contents)
        .with_context(|| format!("Failed to parse form {}", args.form.display()))?;

    let fixture = config.load_fixture()?;
    let notifications = NotificationLog::new();
    let routes = NavigationLog::new();
    let mut cart = build_cart(config, &fixture, &args.cart, &notifications)?;

    let flow = CheckoutFlow::new(
        &notifications,
        &routes,
        config.order_ids(),
        config.checkout_settings(),
    );

    let result = flow.submit(&mut cart, &form).await;
    let mut out = io::stdout().lock();

    write_notifications(&mut out, &notifications)?;

    match result {
        Ok(order) => {
            if let Some(route) = routes.current() {
                writeln!(out, " → {route}")?;
            }

            render::write_order(&mut out, &order)?;

            Ok(())
        }
        Err(CheckoutError::Invalid(errors)) => {
            write_field_errors(&mut out, &errors, args.json)?;

            Err(CheckoutError::Invalid(errors).into())
        }
        Err(error) => Err(error.into()),
    }
}

fn build_cart<'n>(
    config: &StorefrontConfig,
    fixture: &Fixture,
    args: &CartArgs,
    notifications: &'n NotificationLog,
) -> Result<Cart<&'n NotificationLog>> {
    let catalog = fixture.catalog();
    let shipping_fee = config.shipping_fee_in(catalog.currency())?;

    let mut cart = if args.empty {
        Cart::new(shipping_fee, notifications)
    } else {
        fixture.cart(shipping_fee, notifications)?
    };

    for addition in &args.additions {
        let Some(item) = catalog.get(&addition.id) else {
            bail!("Unknown item: {}", addition.id);
        };

        cart.add_or_increment(item, addition.quantity)?;
    }

    Ok(cart)
}

fn write_notifications(out: &mut impl Write, notifications: &NotificationLog) -> Result<()> {
    for notification in notifications.take() {
        writeln!(out, " » {}: {}", notification.title, notification.message)?;
    }

    Ok(())
}

fn write_field_errors(out: &mut impl Write, errors: &FieldErrors, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(errors)?)?;

        return Ok(());
    }

    for (field, message) in errors.iter() {
        writeln!(out, " {field}: {message}")?;
    }

    Ok(())
}
