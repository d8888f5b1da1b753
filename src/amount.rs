use std::fmt;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
///
/// Money never touches floating point outside of input parsing; inexact
/// operations (currency division, interest) round half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    const SCALE: i64 = 10_000;

    pub const ZERO: Amount = Amount(0);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by an integer factor. Exact.
    pub fn scale_by(self, factor: i64) -> Self {
        Amount(self.0 * factor)
    }

    /// Divide by an integer divisor, rounding half away from zero.
    pub fn div_round(self, divisor: i64) -> Self {
        debug_assert!(divisor > 0);
        let a = self.0;
        let q = if a >= 0 {
            (a + divisor / 2) / divisor
        } else {
            -((-a + divisor / 2) / divisor)
        };
        Amount(q)
    }

    /// Multiply by a fractional rate, rounding half away from zero.
    /// Used for interest: `balance.apply_rate(0.02)` is 2% of the balance.
    pub fn apply_rate(self, rate: f64) -> Self {
        Amount((self.0 as f64 * rate).round() as i64)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_scaled_preserves_value() {
        let amount = Amount::from_scaled(123456);
        assert_eq!(amount, Amount(123456));
    }

    #[test]
    fn from_float_converts_correctly() {
        assert_eq!(Amount::from_float(100.0), Amount::from_scaled(1_000_000));
        assert_eq!(Amount::from_float(1.5), Amount::from_scaled(15_000));
        assert_eq!(Amount::from_float(0.0001), Amount::from_scaled(1));
    }

    #[test]
    fn from_float_rounds_correctly() {
        assert_eq!(Amount::from_float(1.23456), Amount::from_scaled(12346));
        assert_eq!(Amount::from_float(1.23454), Amount::from_scaled(12345));
    }

    #[test]
    fn display_formats_positive() {
        assert_eq!(Amount::from_scaled(1_000_000).to_string(), "100.0000");
        assert_eq!(Amount::from_scaled(15_000).to_string(), "1.5000");
        assert_eq!(Amount::from_scaled(1).to_string(), "0.0001");
        assert_eq!(Amount::from_scaled(0).to_string(), "0.0000");
    }

    #[test]
    fn display_formats_negative() {
        assert_eq!(Amount::from_scaled(-502_500).to_string(), "-50.2500");
        assert_eq!(Amount::from_scaled(-1).to_string(), "-0.0001");
    }

    #[test]
    fn arithmetic() {
        let a = Amount::from_scaled(100);
        let b = Amount::from_scaled(30);
        assert_eq!(a + b, Amount::from_scaled(130));
        assert_eq!(a - b, Amount::from_scaled(70));

        let mut c = a;
        c += b;
        assert_eq!(c, Amount::from_scaled(130));
        c -= a;
        assert_eq!(c, Amount::from_scaled(30));
    }

    #[test]
    fn ordering_and_sign() {
        assert!(Amount::from_scaled(-1).is_negative());
        assert!(!Amount::ZERO.is_negative());
        assert!(Amount::from_scaled(100) < Amount::from_scaled(200));
        assert!(Amount::from_scaled(-100) < Amount::ZERO);
    }

    #[test]
    fn scale_by_is_exact() {
        assert_eq!(
            Amount::from_float(10.0).scale_by(5),
            Amount::from_float(50.0)
        );
        assert_eq!(
            Amount::from_float(-2.5).scale_by(5),
            Amount::from_float(-12.5)
        );
    }

    #[test]
    fn div_round_rounds_half_away_from_zero() {
        assert_eq!(Amount::from_scaled(10).div_round(5), Amount::from_scaled(2));
        assert_eq!(Amount::from_scaled(12).div_round(5), Amount::from_scaled(2));
        assert_eq!(Amount::from_scaled(13).div_round(5), Amount::from_scaled(3));
        assert_eq!(
            Amount::from_scaled(-13).div_round(5),
            Amount::from_scaled(-3)
        );
    }

    #[test]
    fn whole_cent_amounts_divide_by_five_exactly() {
        // 0.01 = 100 scaled units, always a multiple of 5
        let cents = Amount::from_float(1234.56);
        assert_eq!(cents.div_round(5).scale_by(5), cents);
    }

    #[test]
    fn apply_rate_computes_interest() {
        let balance = Amount::from_float(1000.0);
        assert_eq!(balance.apply_rate(0.02), Amount::from_float(20.0));
        assert_eq!(balance.apply_rate(0.0), Amount::ZERO);
    }

    #[test]
    fn apply_rate_rounds() {
        // 0.0001 * 0.5 = 0.00005, rounds away from zero to 0.0001
        assert_eq!(
            Amount::from_scaled(1).apply_rate(0.5),
            Amount::from_scaled(1)
        );
    }
}
