//! Exact monetary amounts with two fraction digits.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fraction digits every amount carries.
pub const AMOUNT_SCALE: u32 = 2;

/// A decimal amount always held at scale 2.
///
/// Arithmetic stays in `Decimal` and is checked, so sums of any number of
/// lines are exact or fail as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Rounds half away from zero to two digits. Negative zero becomes zero.
    ///
    /// `None` when the value is too large to carry two fraction digits.
    pub fn try_new(value: Decimal) -> Option<Self> {
        let mut rounded =
            value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(AMOUNT_SCALE);
        if rounded.scale() != AMOUNT_SCALE {
            return None;
        }
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Some(Self(rounded))
    }

    pub fn zero() -> Self {
        Self::from_cents(0)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, AMOUNT_SCALE))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// True when strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).and_then(Self::try_new)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).and_then(Self::try_new)
    }

    /// Exact sum, or `None` once the running total leaves the scale-2 range.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(), Self::checked_add)
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = Decimal;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn amount(text: &str) -> Option<Amount> {
        Amount::try_new(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn renders_two_fraction_digits() {
        assert_eq!(Amount::zero().to_string(), "0.00");
        assert_eq!(Amount::from_cents(15000).to_string(), "150.00");
        assert_eq!(amount("7").unwrap().to_string(), "7.00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(amount("2.345").unwrap().to_string(), "2.35");
        assert_eq!(amount("-2.345").unwrap().to_string(), "-2.35");
    }

    #[test]
    fn negative_zero_is_plain_zero() {
        let amount = amount("-0.001").unwrap();
        assert_eq!(amount.to_string(), "0.00");
        assert!(!amount.is_positive());
    }

    #[test]
    fn rejects_values_without_room_for_cents() {
        assert!(amount("79228162514264337593543950335").is_none());
        assert!(amount("50000000000000000000000000000").is_none());
        let largest = amount("792281625142643375935439503.35").unwrap();
        assert_eq!(largest.to_string(), "792281625142643375935439503.35");
    }

    #[test]
    fn sums_without_drift() {
        let total = Amount::checked_sum(std::iter::repeat_n(Amount::from_cents(1), 10_000));
        assert_eq!(total.unwrap().to_string(), "100.00");
    }

    #[test]
    fn overflowing_sum_is_none() {
        let big = amount("500000000000000000000000000").unwrap();
        assert!(big.checked_add(big).is_none());
        assert!(Amount::checked_sum([big, big, Amount::from_cents(1)]).is_none());
        assert_eq!(
            big.checked_sub(big).unwrap().to_string(),
            "0.00"
        );
    }
}
