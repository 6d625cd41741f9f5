//! Loan lifecycle status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle of a loan: `Active` until returned, then `Returned` for good
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LoanStatus {
    /// The reader still holds the copy
    #[default]
    Active,
    /// The copy came back on the given date
    Returned(NaiveDate),
}

impl LoanStatus {
    /// Get a human-readable description of the status
    #[must_use]
    pub fn get_description(&self) -> String {
        match self {
            Self::Active => "On loan".to_string(),
            Self::Returned(date) => format!("Returned on {date}"),
        }
    }

    /// Whether the loan is still open
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::expect_used)]
    fn descriptions() {
        assert_eq!(LoanStatus::Active.get_description(), "On loan");
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).expect("valid date");
        let returned = LoanStatus::Returned(date);
        assert_eq!(returned.get_description(), "Returned on 2026-03-10");
        assert!(!returned.is_active());
    }
}
