use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Signed money amount represented as **integer cents**.
///
/// The backend exchanges amounts as plain JSON numbers in major units
/// (`12.5` means twelve and a half). They are converted to cents at the
/// serde boundary so that sums never drift.
///
/// # Examples
///
/// ```rust
/// use api_types::money::Money;
///
/// let amount = Money::new(1234);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(amount.format_brl(), "R$ 12,34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator and
/// exponent form; extra decimals are rounded to the cent like JSON values):
///
/// ```rust
/// use api_types::money::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert_eq!("1e3".parse::<Money>().unwrap().cents(), 100_000);
/// assert!("abc".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount")]
    Invalid,
    #[error("amount too large")]
    Overflow,
}

impl Money {
    pub const ZERO: Money = Money(0);

    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Formats the amount as Brazilian Real, e.g. `R$ 1.234,56`.
    #[must_use]
    pub fn format_brl(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = group_thousands(abs / 100);
        let cents = abs % 100;
        format!("{sign}R$ {units},{cents:02}")
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts major units to cents, rounding half away from zero.
    fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Plain decimal rendering with a `.` separator, suitable for editing.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

/// Saturates at the `i64` bounds; backend totals are not range-checked.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, item| Money(acc.0.saturating_add(item.0)))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// Up to two decimals are read exactly; longer fractions and exponent
    /// form go through [`Money::from_major`] rounding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::Empty);
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(MoneyError::Empty);
        }

        let rest = rest.replace(',', ".");
        if rest.contains(['e', 'E']) {
            return parse_rounded(&rest, negative);
        }
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or(MoneyError::Invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(MoneyError::Invalid);
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Invalid);
        }

        let units: i64 = units_str.parse().map_err(|_| MoneyError::Overflow)?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(MoneyError::Invalid);
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| MoneyError::Invalid)? * 10,
                    2 => frac.parse::<i64>().map_err(|_| MoneyError::Invalid)?,
                    _ => return parse_rounded(&rest, negative),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or(MoneyError::Overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

/// `digits[.digits][e[+-]digits]`, without sign, rounded to the cent.
fn parse_rounded(body: &str, negative: bool) -> Result<Money, MoneyError> {
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };

    let (units, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if units.is_empty() || !all_digits(units) || !all_digits(frac) {
        return Err(MoneyError::Invalid);
    }
    if let Some(exponent) = exponent {
        let digits = exponent
            .strip_prefix(['+', '-'])
            .unwrap_or(exponent);
        if digits.is_empty() || !all_digits(digits) {
            return Err(MoneyError::Invalid);
        }
    }

    let value: f64 = body.parse().map_err(|_| MoneyError::Invalid)?;
    Money::from_major(if negative { -value } else { value }).ok_or(MoneyError::Overflow)
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value)
            .ok_or_else(|| de::Error::custom(format!("amount out of range: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(5).to_string(), "0.05");
        assert_eq!(Money::new(100_000).to_string(), "1000.00");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn format_brl_groups_thousands() {
        assert_eq!(Money::new(0).format_brl(), "R$ 0,00");
        assert_eq!(Money::new(99).format_brl(), "R$ 0,99");
        assert_eq!(Money::new(100_000).format_brl(), "R$ 1.000,00");
        assert_eq!(Money::new(123_456_789).format_brl(), "R$ 1.234.567,89");
        assert_eq!(Money::new(-1000).format_brl(), "-R$ 10,00");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("10,50".parse::<Money>().unwrap().cents(), 1050);
        assert_eq!("-0.01".parse::<Money>().unwrap().cents(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().cents(), 230);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Money>(), Err(MoneyError::Empty));
        assert_eq!("-".parse::<Money>(), Err(MoneyError::Empty));
        assert_eq!("abc".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("1.2.3".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("1e".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("e3".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("1.5e+".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("NaN".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("inf".parse::<Money>(), Err(MoneyError::Invalid));
        assert_eq!("1e400".parse::<Money>(), Err(MoneyError::Overflow));
    }

    #[test]
    fn long_fractions_and_exponents_round_to_the_cent() {
        assert_eq!("12.346".parse::<Money>().unwrap().cents(), 1235);
        assert_eq!("1,999".parse::<Money>().unwrap().cents(), 200);
        assert_eq!("0.004".parse::<Money>().unwrap().cents(), 0);
        assert_eq!("0.006".parse::<Money>().unwrap().cents(), 1);
        assert_eq!("-0.125".parse::<Money>().unwrap().cents(), -13);
        assert_eq!("1e3".parse::<Money>().unwrap().cents(), 100_000);
        assert_eq!("2.5E-1".parse::<Money>().unwrap().cents(), 25);
    }

    #[test]
    fn typed_and_wire_amounts_round_alike() {
        for raw in ["0.004", "3.14159", "1e3", "7.0051"] {
            let typed: Money = raw.parse().unwrap();
            let wire: Money = serde_json::from_str(raw).unwrap();
            assert_eq!(typed, wire, "{raw}");
        }
    }

    #[test]
    fn serde_uses_major_units() {
        let json = serde_json::to_string(&Money::new(1050)).unwrap();
        assert_eq!(json, "10.5");
        let parsed: Money = serde_json::from_str("1000").unwrap();
        assert_eq!(parsed, Money::new(100_000));
        let parsed: Money = serde_json::from_str("0.1").unwrap();
        assert_eq!(parsed, Money::new(10));
    }

    #[test]
    fn sum_of_empty_is_zero() {
        let total: Money = std::iter::empty().sum();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn sum_saturates_instead_of_overflowing() {
        let huge: Money = serde_json::from_str("5e16").unwrap();
        let total: Money = [huge, huge].into_iter().sum();
        assert_eq!(total, Money::new(i64::MAX));

        let total: Money = [-huge, -huge].into_iter().sum();
        assert_eq!(total, Money::new(i64::MIN));
    }

    #[test]
    fn checked_ops_report_overflow() {
        let max = Money::new(i64::MAX);
        assert_eq!(max.checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
        assert_eq!(
            Money::new(150).checked_add(Money::new(50)),
            Some(Money::new(200))
        );
    }
}
