//! Terminal rendering
//!
//! Item lists, the cart and order confirmations as `tabled` tables.

use std::{io, ops::Range};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::{CatalogItem, ItemDetail},
    notifications::Notifier,
    orders::Order,
};

/// Errors that can occur when rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Write a titled list of catalog items.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_items<'i>(
    mut out: impl io::Write,
    title: &str,
    items: impl IntoIterator<Item = &'i CatalogItem>,
) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Item", "Price", "Description"]);

    for item in items {
        builder.push_record([
            item.id().to_string(),
            item.name().to_string(),
            item.price().to_string(),
            item.description().unwrap_or_default().to_string(),
        ]);
    }

    writeln!(out, "\n\x1b[1m{title}\x1b[0m")?;
    write_table(&mut out, builder, 2..3)?;

    Ok(())
}

/// Write an item's detail page.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_item_detail(
    mut out: impl io::Write,
    item: &CatalogItem,
    detail: Option<&ItemDetail>,
) -> Result<(), RenderError> {
    writeln!(out, "\n\x1b[1m{}\x1b[0m  {}", item.name(), item.price())?;

    if let Some(description) = item.description() {
        writeln!(out, "{description}")?;
    }

    let Some(detail) = detail else {
        return Ok(());
    };

    if !detail.long_description.is_empty() {
        writeln!(out, "\n{}", detail.long_description)?;
    }

    let mut builder = Builder::default();

    builder.push_record(["Ingredients".to_string(), detail.ingredients.join(", ")]);
    builder.push_record(["Nutrition", detail.nutritional_info.as_str()]);
    builder.push_record(["Allergens", detail.allergen_info.as_str()]);
    builder.push_record(["Preparation", detail.preparation_time.as_str()]);

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    table.with(theme);
    table.modify(Columns::new(0..1), Color::BOLD);

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the cart with its subtotal, shipping and total.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_cart<N: Notifier>(
    mut out: impl io::Write,
    cart: &Cart<N>,
) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "\nYour Pocket is Empty!")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Item", "Price", "Qty", "Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.name().to_string(),
            line.unit_price().to_string(),
            line.quantity().to_string(),
            line.subtotal().to_string(),
        ]);
    }

    write_table(&mut out, builder, 1..4)?;

    write_summary(
        &mut out,
        &[
            ("Subtotal:", cart.subtotal().to_string()),
            ("Shipping:", cart.shipping_fee().to_string()),
            ("Total:", cart.total().to_string()),
        ],
    )?;

    Ok(())
}

/// Write an order confirmation.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_order(mut out: impl io::Write, order: &Order) -> Result<(), RenderError> {
    writeln!(
        out,
        "\n\x1b[1mOrder Confirmed, {}!\x1b[0m  Order ID: {}",
        order.customer_name(),
        order.id()
    )?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Price", "Qty", "Total"]);

    for line in order.lines() {
        builder.push_record([
            line.name.clone(),
            line.unit_price.to_string(),
            line.quantity.to_string(),
            line.line_total().to_string(),
        ]);
    }

    write_table(&mut out, builder, 1..4)?;

    write_summary(
        &mut out,
        &[
            ("Subtotal:", order.subtotal().to_string()),
            ("Shipping:", order.shipping().to_string()),
            ("Total Paid:", order.total().to_string()),
        ],
    )?;

    writeln!(out, " Payment: {}", order.payment_method())?;
    writeln!(
        out,
        " Estimated delivery: {}",
        order.delivery_estimate_label()
    )?;

    Ok(())
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric_columns: Range<usize>,
) -> Result<(), RenderError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(numeric_columns), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_summary(out: &mut impl io::Write, rows: &[(&str, String)]) -> Result<(), RenderError> {
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    Ok(())
}
