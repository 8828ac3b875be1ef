//! Money type for representing Rupiah amounts.
//!
//! Amounts are whole integers in the smallest currency unit. The display
//! format is fixed: `"Rp "` followed by the digits grouped in threes with
//! `.` separators, no decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CartError;

/// Literal prefix of every formatted amount.
pub const CURRENCY_PREFIX: &str = "Rp ";

/// Thousands separator.
pub const THOUSANDS_SEPARATOR: char = '.';

/// A monetary amount in Rupiah.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money value.
    pub fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// Create a zero amount.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Parse a price attribute.
    ///
    /// Accepts only ASCII digits, optionally surrounded by whitespace.
    /// Anything else (empty text, signs, decimals, trailing garbage, values
    /// beyond `i64`) is [`CartError::InvalidInput`].
    ///
    /// ```
    /// use cart_commerce::money::Money;
    /// assert_eq!(Money::parse("50000").unwrap().amount(), 50000);
    /// assert!(Money::parse("50k").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, CartError> {
        let digits = text.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CartError::InvalidInput(format!(
                "price is not a whole number: {:?}",
                text
            )));
        }
        digits
            .parse::<i64>()
            .map(Self)
            .map_err(|_| CartError::InvalidInput(format!("price out of range: {}", digits)))
    }

    /// The raw amount.
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Format as a display string (e.g., "Rp 100.000").
    pub fn display(&self) -> String {
        format!("{}{}", CURRENCY_PREFIX, self.display_amount())
    }

    /// Format the grouped digits without prefix (e.g., "100.000").
    pub fn display_amount(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            grouped.push('-');
        }
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(THOUSANDS_SEPARATOR);
            }
            grouped.push(c);
        }
        grouped
    }

    /// Try to add another amount, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
