use std::fmt;
use std::iter::Sum;

use serde::{Serialize, Serializer};

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    /// Largest single price or payment accepted. Sums of up to 900k of these
    /// still fit in the scaled `i64`.
    pub const MAX: Amount = Amount::from_units(1_000_000_000);

    /// Conversion for trusted literals; non-finite input saturates.
    /// Use [`Amount::try_from_float`] for external input.
    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    /// `None` for NaN, infinities and values outside the scaled `i64` range.
    pub fn try_from_float(value: f64) -> Option<Self> {
        let scaled = (value * Self::SCALE as f64).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Amount(scaled as i64))
    }

    pub const fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole currency units, e.g. `Amount::from_units(120)` is `120.0000`.
    pub const fn from_units(units: i64) -> Self {
        Amount(units * Self::SCALE)
    }

    pub const fn scaled(&self) -> i64 {
        self.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The share of this amount given by `rate`, rounded half away from zero.
    ///
    /// `Amount::from_units(120).apply(Rate::from_bps(1000))` is `12.0000`.
    pub fn apply(&self, rate: Rate) -> Amount {
        // i128 so large amounts cannot overflow before the division
        let product = self.0 as i128 * rate.bps() as i128;
        let half = Rate::ONE_HUNDRED_PERCENT as i128 / 2;
        let rounded = if product < 0 {
            (product - half) / Rate::ONE_HUNDRED_PERCENT as i128
        } else {
            (product + half) / Rate::ONE_HUNDRED_PERCENT as i128
        };
        Amount(rounded as i64)
    }

    /// This amount with `rate` taken off.
    pub fn discounted_by(&self, rate: Rate) -> Amount {
        *self - self.apply(rate)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        let whole = abs / Self::SCALE;
        let frac = abs % Self::SCALE;
        write!(f, "{sign}{whole}.{frac:04}")
    }
}

/// Serialized as a plain number so invoice details read naturally in JSON.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0 as f64 / Self::SCALE as f64)
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// A percentage expressed in basis points: 1000 bps is 10%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Rate(u32);

impl Rate {
    const ONE_HUNDRED_PERCENT: u32 = 10_000;

    pub const ZERO: Rate = Rate(0);

    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    pub const fn bps(&self) -> u32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Rates stack additively and saturate at 100%.
impl std::ops::Add for Rate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Rate((self.0 + rhs.0).min(Self::ONE_HUNDRED_PERCENT))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scaled_preserves_value() {
        let amount = Amount::from_scaled(123456);
        assert_eq!(amount, Amount(123456));
    }

    #[test]
    fn from_units_scales() {
        assert_eq!(Amount::from_units(120), Amount::from_scaled(1_200_000));
        assert_eq!(Amount::from_units(-3), Amount::from_scaled(-30_000));
    }

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(100.0), Amount::from_scaled(1_000_000));
        assert_eq!(Amount::from_float(99.99), Amount::from_scaled(999_900));
        assert_eq!(Amount::from_float(0.0001), Amount::from_scaled(1));
    }

    #[test]
    fn try_from_float_rejects_non_finite() {
        assert_eq!(Amount::try_from_float(75.6), Some(Amount::from_scaled(756_000)));
        assert_eq!(Amount::try_from_float(f64::NAN), None);
        assert_eq!(Amount::try_from_float(f64::INFINITY), None);
        assert_eq!(Amount::try_from_float(f64::NEG_INFINITY), None);
        assert_eq!(Amount::try_from_float(1.0e300), None);
    }

    #[test]
    fn max_sums_fit() {
        let total: Amount = std::iter::repeat_n(Amount::MAX, 900_000).sum();
        assert!(total > Amount::MAX);
    }

    #[test]
    fn from_float_rounds_correctly() {
        assert_eq!(Amount::from_float(1.23456), Amount::from_scaled(12346));
        assert_eq!(Amount::from_float(1.23454), Amount::from_scaled(12345));
    }

    #[test]
    fn display_formats_four_decimals() {
        assert_eq!(Amount::from_scaled(1_166_400).to_string(), "116.6400");
        assert_eq!(Amount::from_scaled(1).to_string(), "0.0001");
        assert_eq!(Amount::ZERO.to_string(), "0.0000");
        assert_eq!(Amount::from_scaled(-502_500).to_string(), "-50.2500");
    }

    #[test]
    fn arithmetic() {
        let mut a = Amount::from_scaled(100);
        a += Amount::from_scaled(50);
        assert_eq!(a, Amount::from_scaled(150));
        a -= Amount::from_scaled(30);
        assert_eq!(a, Amount::from_scaled(120));
        assert_eq!(a - Amount::from_scaled(20), Amount::from_scaled(100));
        assert_eq!(a + Amount::from_scaled(1), Amount::from_scaled(121));
    }

    #[test]
    fn sum_of_amounts() {
        let prices = [Amount::from_units(10), Amount::from_units(20), Amount::from_float(0.5)];
        let total: Amount = prices.iter().sum();
        assert_eq!(total, Amount::from_float(30.5));
        assert_eq!(Vec::<Amount>::new().into_iter().sum::<Amount>(), Amount::ZERO);
    }

    #[test]
    fn apply_rate() {
        let total = Amount::from_units(120);
        assert_eq!(total.apply(Rate::from_bps(1000)), Amount::from_units(12));
        assert_eq!(
            Amount::from_units(108).apply(Rate::from_bps(800)),
            Amount::from_float(8.64)
        );
        assert_eq!(total.apply(Rate::ZERO), Amount::ZERO);
    }

    #[test]
    fn apply_rate_rounds_half_away_from_zero() {
        // 0.0005 * 10% = 0.00005 -> 0.0001
        assert_eq!(Amount::from_scaled(5).apply(Rate::from_bps(1000)), Amount::from_scaled(1));
        assert_eq!(Amount::from_scaled(-5).apply(Rate::from_bps(1000)), Amount::from_scaled(-1));
        assert_eq!(Amount::from_scaled(4).apply(Rate::from_bps(1000)), Amount::ZERO);
    }

    #[test]
    fn discounted_by_rate() {
        assert_eq!(
            Amount::from_units(100).discounted_by(Rate::from_bps(3000)),
            Amount::from_units(70)
        );
    }

    #[test]
    fn rates_add_and_saturate() {
        assert_eq!(Rate::from_bps(1000) + Rate::from_bps(2000), Rate::from_bps(3000));
        assert_eq!(Rate::from_bps(9000) + Rate::from_bps(5000), Rate::from_bps(10_000));
    }

    #[test]
    fn rate_display() {
        assert_eq!(Rate::from_bps(800).to_string(), "8.00%");
        assert_eq!(Rate::from_bps(825).to_string(), "8.25%");
    }

    #[test]
    fn ordering() {
        let negative = Amount::from_scaled(-100);
        let positive = Amount::from_scaled(100);
        assert!(negative < Amount::ZERO);
        assert!(Amount::ZERO < positive);
        assert!(negative.is_negative());
    }
}
