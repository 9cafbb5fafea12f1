//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides safe arithmetic operations, lenient parsing of
//! user-entered amounts and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use household::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars_cents(dollars: i64, cents: i64) -> Self {
        Self(dollars * 100 + cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a user-entered amount such as `"$1,234.56"` or `"12.5"`
    ///
    /// Every character other than ASCII digits, `.` and `-` is dropped first,
    /// then the longest leading decimal number is read (`"12.3.4"` reads as
    /// 12.3). The value is rounded to the nearest cent with halves going
    /// toward positive infinity.
    ///
    /// # Examples
    /// ```
    /// use household::models::Money;
    /// assert_eq!(Money::parse("$1,234.56").unwrap().cents(), 123456);
    /// assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
    /// ```
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = input
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        let mut chars = cleaned.chars().peekable();
        let negative = chars.next_if_eq(&'-').is_some();

        let mut whole = String::new();
        while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
            whole.push(c);
        }

        let mut fraction = String::new();
        if chars.next_if_eq(&'.').is_some() {
            while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
                fraction.push(c);
            }
        }

        if whole.is_empty() && fraction.is_empty() {
            return Err(MoneyParseError::InvalidFormat(input.to_string()));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(input.to_string()))?
        };

        let digits: Vec<i64> = fraction
            .bytes()
            .map(|b| i64::from(b - b'0'))
            .collect();
        let digit = |i: usize| digits.get(i).copied().unwrap_or(0);
        let cents_part = digit(0) * 10 + digit(1);

        // Position of the remainder (beyond the second decimal) relative to half a cent
        let third = digit(2);
        let rest_nonzero = digits.iter().skip(3).any(|d| *d != 0);
        let round_up = if negative {
            third > 5 || (third == 5 && rest_nonzero)
        } else {
            third >= 5
        };

        let magnitude = whole_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents_part))
            .and_then(|c| c.checked_add(i64::from(round_up)))
            .ok_or_else(|| MoneyParseError::OutOfRange(input.to_string()))?;

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Convert a numeric amount in currency units, rounding like [`Money::parse`]
    pub fn from_f64(value: f64) -> Result<Self, MoneyParseError> {
        let cents = (value * 100.0 + 0.5).floor();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Divide into `parts` equal shares, rounding each share up to the next cent
    ///
    /// The shares together may exceed the original by less than `parts` cents;
    /// whoever fronted the money is never under-collected.
    ///
    /// # Examples
    /// ```
    /// use household::models::Money;
    /// assert_eq!(Money::from_cents(10000).ceil_share(3).cents(), 3334);
    /// ```
    pub fn ceil_share(&self, parts: usize) -> Self {
        let parts = i64::try_from(parts.max(1)).unwrap_or(i64::MAX);
        let quotient = self.0 / parts;
        if self.0 % parts > 0 {
            Self(quotient + 1)
        } else {
            Self(quotient)
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }

    /// Plain decimal form without a symbol (`"33.34"`)
    pub fn to_decimal_string(&self) -> String {
        self.format_with_symbol("")
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// An amount as submitted by a caller: either a number or a formatted string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    pub fn to_money(&self) -> Result<Money, MoneyParseError> {
        match self {
            Self::Number(value) => Money::from_f64(*value),
            Self::Text(text) => Money::parse(text),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => {
                write!(f, "Amount must be a valid number (got '{}')", s)
            }
            MoneyParseError::OutOfRange(s) => write!(f, "Amount is out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(3334).to_decimal_string(), "33.34");
    }

    #[test]
    fn test_parse_currency_strings() {
        assert_eq!(Money::parse("$100.00").unwrap().cents(), 10000);
        assert_eq!(Money::parse("1,234.5").unwrap().cents(), 123450);
        assert_eq!(Money::parse(" 42 ").unwrap().cents(), 4200);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("-$10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("12.3.4").unwrap().cents(), 1230);
        assert_eq!(Money::parse("5-3").unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_rounds_half_toward_positive_infinity() {
        assert_eq!(Money::parse("0.125").unwrap().cents(), 13);
        assert_eq!(Money::parse("0.124").unwrap().cents(), 12);
        assert_eq!(Money::parse("-0.125").unwrap().cents(), -12);
        assert_eq!(Money::parse("-0.1251").unwrap().cents(), -13);
        assert_eq!(Money::parse("9.995").unwrap().cents(), 1000);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("$-.").is_err());
        assert!(matches!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Money::from_f64(33.34).unwrap().cents(), 3334);
        assert_eq!(Money::from_f64(100.0).unwrap().cents(), 10000);
        assert!(Money::from_f64(f64::NAN).is_err());
        assert!(Money::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ceil_share() {
        assert_eq!(Money::from_cents(10000).ceil_share(3).cents(), 3334);
        assert_eq!(Money::from_cents(10000).ceil_share(4).cents(), 2500);
        assert_eq!(Money::from_cents(1).ceil_share(3).cents(), 1);
        assert_eq!(Money::from_cents(0).ceil_share(3).cents(), 0);
        assert_eq!(Money::from_cents(-1000).ceil_share(3).cents(), -333);
        assert_eq!(Money::from_cents(500).ceil_share(0).cents(), 500);
    }

    #[test]
    fn test_amount_input_untagged() {
        let number: AmountInput = serde_json::from_str("12.5").unwrap();
        let text: AmountInput = serde_json::from_str(r#""$12.50""#).unwrap();
        assert_eq!(number.to_money().unwrap(), text.to_money().unwrap());
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 600);
    }
}
