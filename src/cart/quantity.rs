//! Quantities

use std::{fmt, num::NonZeroU32};

/// A cart line quantity. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Create a quantity from untrusted input, clamping it into `1..=u32::MAX`.
    pub fn clamped(value: i64) -> Self {
        let value = u32::try_from(value.max(1))
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);

        Self(value)
    }

    /// The quantity as a plain integer.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Add two quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Interpret text typed into a quantity box.
///
/// The leading integer is taken (`"3abc"` is 3, `"2.7"` is 2, leading whitespace is skipped).
/// Text without a leading integer and the value zero both read as 1. Negative values are kept,
/// so typing `-2` removes the line.
pub fn parse_quantity_input(input: &str) -> i64 {
    let trimmed = input.trim_start();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let magnitude = unsigned
        .chars()
        .map_while(|ch| ch.to_digit(10))
        .fold(None, |acc: Option<i64>, digit| {
            Some(
                acc.unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(i64::from(digit)),
            )
        });

    match magnitude {
        None | Some(0) => 1,
        Some(value) if negative => -value,
        Some(value) => value,
    }
}
