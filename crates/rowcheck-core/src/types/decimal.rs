use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign};
use rust_decimal::Decimal as WrappedDecimal;
use serde::{Deserialize, Serialize};

///
/// Decimal
///
/// Arbitrary-precision decimal scalar backing every numeric value in
/// the engine. Integers convert exactly; floats go through a text
/// round-trip so the decimal carries the digits the float displays,
/// not its binary expansion.
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    FromStr,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Sub,
    SubAssign,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    /// Absolute tolerance shared by every tolerant numeric comparison.
    pub const EPSILON: Self = Self(WrappedDecimal::from_parts(1, 0, 0, false, 6));

    /// Construct a decimal from mantissa and scale.
    #[must_use]
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    /// Lossless conversion from a float through its shortest text form.
    ///
    /// Returns `None` for non-finite inputs and for magnitudes outside
    /// the representable decimal range.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        format!("{value}").parse().ok()
    }

    /// Equality within `EPSILON` absolute tolerance.
    #[must_use]
    pub fn eq_within_epsilon(self, other: Self) -> bool {
        match self.0.checked_sub(other.0) {
            Some(diff) => diff.abs() <= Self::EPSILON.0,
            // Subtraction overflow means the operands are far apart.
            None => false,
        }
    }

    /// True when `self` exceeds `other` by more than `EPSILON`.
    #[must_use]
    pub fn exceeds_by_epsilon(self, other: Self) -> bool {
        match self.0.checked_sub(other.0) {
            Some(diff) => diff > Self::EPSILON.0,
            None => self.0 > other.0,
        }
    }

    /// Truncate toward zero, dropping any fractional component.
    #[must_use]
    pub fn trunc(self) -> Self {
        Self(self.0.trunc())
    }

    /// Returns true if the decimal has no fractional component.
    #[must_use]
    pub fn is_integer(self) -> bool {
        self.0.trunc() == self.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(WrappedDecimal::from(value))
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self(WrappedDecimal::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_is_one_millionth() {
        assert_eq!(Decimal::EPSILON, "0.000001".parse().unwrap());
    }

    #[test]
    fn float_round_trip_keeps_displayed_digits() {
        let d = Decimal::from_f64(0.1).unwrap();
        assert_eq!(d.to_string(), "0.1");
    }

    #[test]
    fn float_round_trip_rejects_non_finite() {
        assert!(Decimal::from_f64(f64::NAN).is_none());
        assert!(Decimal::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn tolerant_equality_is_reflexive_and_symmetric() {
        let a = Decimal::from_f64(1.000_000_1).unwrap();
        let b = Decimal::from(1);
        assert!(a.eq_within_epsilon(a));
        assert!(a.eq_within_epsilon(b));
        assert!(b.eq_within_epsilon(a));
    }

    #[test]
    fn tolerant_inequality_needs_more_than_epsilon() {
        let a = Decimal::from_f64(1.001).unwrap();
        let b = Decimal::from(1);
        assert!(!a.eq_within_epsilon(b));
        assert!(a.exceeds_by_epsilon(b));
        assert!(!b.exceeds_by_epsilon(a));
    }

    #[test]
    fn trunc_drops_fraction_toward_zero() {
        assert_eq!(Decimal::from_f64(3.9).unwrap().trunc(), Decimal::from(3));
        assert_eq!(Decimal::from_f64(-3.9).unwrap().trunc(), Decimal::from(-3));
    }
}
