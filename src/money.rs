use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Money in integer minor units (cents). The simulation loop runs entirely on
/// this type so that hundreds of iterations accumulate no binary-float drift;
/// `Decimal` appears only at the boundary (parsing, rates, serialization).
///
/// Rounding convention everywhere: round-half-up (`MidpointAwayFromZero`),
/// applied once per conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    /// one minor unit, the smallest representable amount
    pub const CENT: Money = Money(1);

    /// create from a major-unit decimal, rounding half-up to the minor unit
    pub fn from_decimal(d: Decimal) -> Self {
        let cents = (d * dec!(100)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // saturates if the amount leaves i64 minor-unit range
        Money(cents.to_i64().unwrap_or(i64::MAX))
    }

    /// create from a whole major-unit amount (dollars, rubles, ...)
    pub fn from_major(amount: i64) -> Self {
        Money(amount.saturating_mul(100))
    }

    /// create from minor units (cents)
    pub fn from_minor(cents: i64) -> Self {
        Money(cents)
    }

    /// minor units (cents)
    pub fn as_minor(&self) -> i64 {
        self.0
    }

    /// major-unit decimal, always with two fractional digits
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// multiply by a rate factor, rounding half-up to the minor unit;
    /// used for the per-month interest charge
    pub fn mul_rate(&self, rate: Decimal) -> Self {
        let product =
            (Decimal::from(self.0) * rate).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Money(product.to_i64().unwrap_or(i64::MAX))
    }

    /// divide by a month count, rounding half-up; requires a non-negative
    /// amount (the midpoint shift misrounds below zero)
    pub fn div_round(&self, n: u32) -> Self {
        debug_assert!(self.0 >= 0);
        let n = i64::from(n.max(1));
        Money((self.0 + n / 2) / n)
    }

    /// divide by a month count, truncating toward zero
    pub fn div_floor(&self, n: u32) -> Self {
        Money(self.0 / i64::from(n.max(1)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_decimal())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

// on the wire Money is a major-unit decimal string, e.g. "1234.56".
// fully qualified calls: Decimal's inherent serialize/deserialize methods
// (raw binary form) shadow the serde trait methods
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.as_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Money::from_decimal(<Decimal as Deserialize>::deserialize(
            deserializer,
        )?))
    }
}

/// annual interest rate, stored as a decimal fraction (0.125 for 12.5%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from a decimal fraction (e.g. 0.125 for 12.5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from a percentage (e.g. 12.5 for 12.5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p / dec!(100))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        (self.0 * dec!(100)).normalize()
    }

    /// simple per-period conversion: annual / 12, the standard consumer-loan
    /// convention (no effective-rate compounding)
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / dec!(12))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

// on the wire Rate is the annual percentage, e.g. "12.5"
impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(&self.as_percentage(), serializer)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Rate::from_percentage(<Decimal as Deserialize>::deserialize(
            deserializer,
        )?))
    }
}
