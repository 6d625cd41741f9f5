//! Overdue arithmetic shared by returns and fine previews.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Fine charged per overdue day; finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FineRate(f64);

impl FineRate {
    /// Rate used when nothing is configured
    pub const DEFAULT: Self = Self(1.0);

    /// Validate a per-day rate
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` if `per_day` is negative, NaN or infinite
    pub fn new(per_day: f64) -> Result<Self> {
        if per_day.is_finite() && per_day >= 0.0 {
            Ok(Self(per_day))
        } else {
            Err(LibraryError::Validation("fine_per_day must be non-negative".to_string()))
        }
    }

    /// The raw per-day amount
    #[must_use]
    pub fn per_day(self) -> f64 {
        self.0
    }

    /// Fine for `overdue_days`, rounded to two decimal places
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fine_for(self, overdue_days: i64) -> f64 {
        round_to_cents(overdue_days as f64 * self.0)
    }

    /// Fine for a copy due on `due_date` and returned on `return_date`
    #[must_use]
    pub fn fine_between(self, due_date: NaiveDate, return_date: NaiveDate) -> f64 {
        self.fine_for(overdue_days(due_date, return_date))
    }
}

impl Default for FineRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for FineRate {
    type Error = LibraryError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FineRate> for f64 {
    fn from(rate: FineRate) -> Self {
        rate.0
    }
}

/// Whole days between `due_date` and `return_date`, clamped at zero
#[must_use]
pub fn overdue_days(due_date: NaiveDate, return_date: NaiveDate) -> i64 {
    return_date.signed_duration_since(due_date).num_days().max(0)
}

/// Round to two decimal places, ties to even on the exact binary value
///
/// `amount * 100.0` may land on a `.5` that the exact product does not; the
/// fused residual tells which side of the tie the exact product lies on.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn round_to_cents(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    let residual = amount.mul_add(100.0, -scaled);
    let on_tie = (scaled - scaled.trunc()).abs() == 0.5;
    let rounded = if on_tie && residual > 0.0 {
        scaled.ceil()
    } else if on_tie && residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}
