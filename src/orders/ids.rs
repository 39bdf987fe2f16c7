//! Order ids

use std::fmt::{Display, Formatter, Result as FmtResult};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Default prefix for generated order ids.
pub const DEFAULT_ORDER_PREFIX: &str = "DORA";

const SUFFIX_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_998;

/// Order identifier, e.g. `DORA12345`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderId(String);

impl OrderId {
    /// Wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Source of order identifiers.
pub trait OrderIdGenerator {
    /// Produce the next identifier.
    fn next_id(&mut self) -> OrderId;
}

/// Prefix followed by a random five digit number.
///
/// Uniqueness is best effort; there are 89,999 possible ids per prefix.
#[derive(Debug)]
pub struct RandomOrderIds<R: Rng = StdRng> {
    prefix: String,
    rng: R,
}

impl RandomOrderIds<StdRng> {
    /// Create a generator seeded from the operating system.
    pub fn from_entropy(prefix: impl Into<String>) -> Self {
        Self::with_rng(prefix, StdRng::from_entropy())
    }
}

impl Default for RandomOrderIds<StdRng> {
    fn default() -> Self {
        Self::from_entropy(DEFAULT_ORDER_PREFIX)
    }
}

impl<R: Rng> RandomOrderIds<R> {
    /// Create a generator drawing from `rng`.
    pub fn with_rng(prefix: impl Into<String>, rng: R) -> Self {
        Self {
            prefix: prefix.into(),
            rng,
        }
    }
}

impl<R: Rng> OrderIdGenerator for RandomOrderIds<R> {
    fn next_id(&mut self) -> OrderId {
        let suffix = self.rng.gen_range(SUFFIX_RANGE);

        OrderId(format!("{}{suffix}", self.prefix))
    }
}

/// Prefix followed by an increasing counter. Deterministic, for tests and replays.
#[derive(Debug, Clone)]
pub struct SequentialOrderIds {
    prefix: String,
    next: u32,
}

impl SequentialOrderIds {
    /// Start counting at `first`.
    pub fn new(prefix: impl Into<String>, first: u32) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
        }
    }
}

impl OrderIdGenerator for SequentialOrderIds {
    fn next_id(&mut self) -> OrderId {
        let id = OrderId(format!("{}{}", self.prefix, self.next));

        self.next = self.next.wrapping_add(1);

        id
    }
}
