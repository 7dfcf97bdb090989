use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fixed-point decimal with 4 decimal places, stored as a scaled integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Amount(i64);

/// Error returned when text cannot be read as an [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}

impl Amount {
    const SCALE: i64 = 10_000;
    const DIGITS: usize = 4;

    pub const ZERO: Amount = Amount(0);

    pub fn from_float(value: f64) -> Self {
        Amount((value * Self::SCALE as f64).round() as i64)
    }

    pub fn from_scaled(value: i64) -> Self {
        Amount(value)
    }

    /// Whole units, e.g. `Amount::from_units(500)` is 500.0000.
    pub fn from_units(units: i64) -> Self {
        Amount(units * Self::SCALE)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// `None` when the sum does not fit.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// `None` when the difference does not fit.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Amount)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ParseAmountError::NotANumber(trimmed.to_string()))?;

        if !value.is_finite() {
            return Err(ParseAmountError::NotANumber(trimmed.to_string()));
        }
        // f64 -> i64 casts saturate, so catch overflow before scaling
        if value.abs() >= (i64::MAX / Self::SCALE) as f64 {
            return Err(ParseAmountError::OutOfRange(trimmed.to_string()));
        }

        Ok(Amount::from_float(value))
    }
}

/// Prints 2 fractional digits unless a precision is given (at most 4).
/// Width, fill, alignment and the `+` flag apply to the whole number.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(2).min(Self::DIGITS);
        let divisor = 10_u64.pow((Self::DIGITS - digits) as u32);

        // round half away from zero on the dropped digits
        let rounded = (self.0.unsigned_abs() + divisor / 2) / divisor;

        let unit = Self::SCALE as u64 / divisor;
        let whole = rounded / unit;
        let number = if digits == 0 {
            whole.to_string()
        } else {
            let frac = rounded % unit;
            format!("{whole}.{frac:0digits$}")
        };
        // pad_integral handles sign and width but leaves precision alone
        f.pad_integral(self.0 >= 0 || rounded == 0, "", &number)
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
