//! Monetary amounts.
//!
//! Amounts are integers in minor units (cents) so sums are exact. Display
//! groups thousands with commas and always shows two decimals.
//!
//! The arithmetic operators saturate at the `i64` bounds; use
//! [`Money::checked_add`] and [`Money::checked_sub`] to detect overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// An amount of money in minor units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Amount from minor units (cents)
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Amount from whole currency units, saturating on overflow
    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Amount from whole currency units with overflow checking
    #[must_use]
    pub const fn checked_from_major(major: i64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Amount in minor units
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// `percent` per cent of this amount, rounded toward zero
    #[must_use]
    pub const fn percent(self, percent: u8) -> Self {
        let scaled = self.0 as i128 * percent as i128 / 100;
        if scaled > i64::MAX as i128 {
            Self(i64::MAX)
        } else if scaled < i64::MIN as i128 {
            Self(i64::MIN)
        } else {
            Self(scaled as i64)
        }
    }

    /// Adds two amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Subtracts two amounts with overflow checking
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Returns true if the amount is below zero
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Display string prefixed with a currency code, e.g. `USD 1,250.00`
    #[must_use]
    pub fn format(self, currency: &str) -> String {
        format!("{currency} {self}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minor = self.0.unsigned_abs();
        let digits = (minor / 100).to_string();
        let cents = minor % 100;

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{grouped}.{cents:02}")
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
