//! Monetary values
//!
//! All amounts are BRL decimals normalized to two places; arithmetic never
//! touches floating point. Wire payloads of the current API generation tag
//! every amount with its unit, so cents are converted at the boundary and
//! no magnitude guessing happens anywhere in the codebase.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary amount in BRL, normalized to two decimal places.
///
/// Construction always rounds half-away-from-zero to cents, so two `Money`
/// values compare by monetary value regardless of how they were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(2);
        Self(normalized)
    }

    /// Build from an integer amount of centavos.
    #[must_use]
    pub fn from_centavos(centavos: i64) -> Self {
        Self(Decimal::new(centavos, 2))
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Subtraction clamped at zero. Open balances never go negative, even
    /// when a backend reports more paid than owed.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < Decimal::ZERO {
            Self::ZERO
        } else {
            Self(diff)
        }
    }

    /// Negative amounts collapse to zero; everything else passes through.
    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Self::ZERO
        } else {
            self
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s).map(Self::new)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

/// Whole reais, mostly a test convenience.
impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self::new(Decimal::from(value))
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Both backend generations exchange amounts as JSON numbers, not
        // strings. Two-decimal BRL values fit f64 exactly at any realistic
        // magnitude.
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize<'de>>::deserialize(deserializer).map(Self::new)
    }
}

/// Unit a tagged wire amount is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountUnit {
    Centavos,
    Reais,
}

/// Amount as sent by the current API generation: a value plus an explicit
/// unit tag.
///
/// The legacy generation sends bare numbers, which are reais by contract and
/// decode straight into [`Money`]; `WireAmount` only appears where the
/// payload tags its unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WireAmount {
    pub valor: Decimal,
    pub unidade: AmountUnit,
}

impl WireAmount {
    #[must_use]
    pub fn to_money(self) -> Money {
        match self.unidade {
            AmountUnit::Centavos => Money::new(self.valor / Decimal::ONE_HUNDRED),
            AmountUnit::Reais => Money::new(self.valor),
        }
    }
}

impl From<WireAmount> for Money {
    fn from(value: WireAmount) -> Self {
        value.to_money()
    }
}
