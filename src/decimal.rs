//! Exact decimal arithmetic for monetary amounts.
//!
//! Wraps `rust_decimal` with checked addition and subtraction capped at a
//! fixed number of significant digits, so currency values never suffer
//! binary floating-point error or silent rounding.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A decimal result could not be represented at [`Amount::PRECISION`]
/// significant digits.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("decimal result not representable at {} significant digits", Amount::PRECISION)]
pub struct ArithmeticError;

/// An exact monetary amount.
///
/// All ledger arithmetic goes through [`checked_add`](Amount::checked_add)
/// and [`checked_sub`](Amount::checked_sub), which fail instead of rounding
/// when a result needs more than [`PRECISION`](Amount::PRECISION) significant
/// digits. The textual scale of the input is preserved (`"10.50"` stays
/// `10.50`).
///
/// # Examples
///
/// ```
/// use card_ledger::Amount;
///
/// let amount: Amount = "10.50".parse().unwrap();
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!(format!("{:>9.2}", amount), "    10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Maximum significant digits for any arithmetic result. Matches
    /// standard accounting precision.
    pub const PRECISION: u32 = 16;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Returns `self + rhs`, or an error if the exact result is not
    /// representable within [`PRECISION`](Amount::PRECISION) significant
    /// digits.
    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(rhs.0)
            .filter(fits_precision)
            .map(Amount)
            .ok_or(ArithmeticError)
    }

    /// Returns `self - rhs`, with the same representability guarantee as
    /// [`checked_add`](Amount::checked_add).
    pub fn checked_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(rhs.0)
            .filter(fits_precision)
            .map(Amount)
            .ok_or(ArithmeticError)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

/// Returns `true` if the coefficient fits in `PRECISION` significant digits.
fn fits_precision(value: &Decimal) -> bool {
    let mut mantissa = value.mantissa().unsigned_abs();
    let mut digits = 0;

    while mantissa > 0 {
        mantissa /= 10;
        digits += 1;
    }

    digits <= Amount::PRECISION
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Amount)
    }
}

impl fmt::Display for Amount {
    /// Delegates to the inner decimal, so width and precision specifiers
    /// apply (`{:>9.2}` renders a right-aligned two-fraction-digit column).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
