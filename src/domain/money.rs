use crate::error::{FareError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Rounds to two decimal places, half-up.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// True when `value` needs no more than two decimal places.
pub fn within_cents(value: Decimal) -> bool {
    value.normalize().scale() <= 2
}

/// A monetary value in currency units.
///
/// This is a wrapper around `rust_decimal::Decimal`. It may be zero (an empty
/// till, a sales counter before the first sale) but the operations that produce
/// it never drive it negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn rounded(self) -> Self {
        Self(round2(self.0))
    }

    /// `None` when the sum does not fit in a `Decimal`.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Running totals stop at `Decimal::MAX` rather than wrap or panic.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl From<Price> for Money {
    fn from(price: Price) -> Self {
        Self(price.0)
    }
}

/// A strictly positive ticket price, in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO && within_cents(value) {
            Ok(Self(value))
        } else {
            Err(FareError::InvalidPrice)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies by a positive factor and stores the rounded product.
    pub(crate) fn scaled(self, factor: Decimal) -> Result<Self> {
        let product = self
            .0
            .checked_mul(factor)
            .ok_or(FareError::InvalidFactor(factor))?;
        Self::new(round2(product))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = FareError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A discount percentage in the half-open range (0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO && value <= Decimal::ONE_HUNDRED {
            Ok(Self(value))
        } else {
            Err(FareError::InvalidDiscount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The percentage as a fraction of one.
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = FareError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(pct: Percentage) -> Self {
        pct.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.normalize();
        if value.scale() == 0 {
            write!(f, "{value}.0%")
        } else {
            write!(f, "{value}%")
        }
    }
}
