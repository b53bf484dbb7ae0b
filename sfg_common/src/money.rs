use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Div, Mul, Neg, Sub, SubAssign},
};

use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

//--------------------------------------       Money         ---------------------------------------------------------

/// A monetary amount in some [`crate::Currency`], kept at full decimal precision.
///
/// Amounts are only rounded when [`Money::round_2dp`] is called explicitly, so intermediate
/// arithmetic (currency conversion, markups) never loses precision.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Div<Decimal> for Money {
    type Output = Self;

    fn div(self, rhs: Decimal) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a money amount: {0}")]
pub struct MoneyConversionError(String);

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Decimal::from_f64(value)
            .map(Self)
            .ok_or_else(|| MoneyConversionError(format!("{value} is not a finite decimal value")))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Money {
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to 2 decimal places with banker's rounding, so midpoints go to the even neighbour.
    /// This matches how the catalog rounds marked-up prices before display.
    pub fn round_2dp(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}
