//! Money type for representing currency amounts
//!
//! Amounts are plain decimals (f64) so an equal split can hand every
//! participant the same unrounded per-head value. Rounding only happens at
//! display time, to two decimal places. Anything non-finite collapses to
//! zero on the way in.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Tolerance used when comparing two amounts that should be equal
pub const EPSILON: f64 = 0.01;

/// A monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Create a Money amount, coercing NaN and infinities to zero
    ///
    /// # Examples
    /// ```
    /// use fairshare::models::Money;
    /// assert_eq!(Money::new(12.5).value(), 12.5);
    /// assert!(Money::new(f64::NAN).is_zero());
    /// ```
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw decimal value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Value rounded to two decimal places
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }

    /// Check if the amount is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// True when the two amounts differ by less than one hundredth
    pub fn approx_eq(&self, other: Money) -> bool {
        (self.0 - other.0).abs() < EPSILON
    }

    /// True when the amount rounds to something other than zero
    pub fn is_outstanding(&self) -> bool {
        self.0.abs() > EPSILON
    }

    /// Divide evenly between `count` parties; zero parties yields zero
    pub fn split_evenly(&self, count: usize) -> Self {
        if count == 0 {
            Self::zero()
        } else {
            Self::new(self.0 / count as f64)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "₹10.50", "1,250.00", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.trim_start_matches(['$', '₹', '€', '£']);
        let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

        let value: f64 = cleaned
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite(s.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Parse leniently: anything unparsable or non-finite becomes zero
    pub fn coerce(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded();
        if rounded < 0.0 {
            format!("-{}{:.2}", symbol, rounded.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.abs())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self::new(value.unwrap_or(0.0)))
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        if rounded < 0.0 {
            write!(f, "-{:.2}", rounded.abs())
        } else {
            write!(f, "{:.2}", rounded.abs())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
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

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::NotFinite(s) => write!(f, "Amount is not a finite number: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
