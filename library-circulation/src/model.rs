//! Records owned by [`crate::LibraryManager`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loan_status::LoanStatus;

/// A title in the inventory together with its copy counts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Unique, trimmed identifier
    pub book_id: String,
    /// Title used for search
    pub title: String,
    /// Author used for search
    pub author: String,
    /// Copies owned by the library, always positive
    pub total_copies: u32,
    /// Copies currently on the shelf, never above `total_copies`
    pub available_copies: u32,
}

impl Book {
    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// A registered library member
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reader {
    /// Unique, trimmed identifier
    pub reader_id: String,
    /// Display name
    pub full_name: String,
}

/// Composite key of the active-loan index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct LoanKey {
    /// Borrowed book
    pub book_id: String,
    /// Borrowing reader
    pub reader_id: String,
}

impl LoanKey {
    /// Build a key from already-normalized ids
    #[must_use]
    pub fn new(book_id: impl Into<String>, reader_id: impl Into<String>) -> Self {
        Self { book_id: book_id.into(), reader_id: reader_id.into() }
    }
}

/// One issuance of a book to a reader
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Loan {
    /// Borrowed book
    pub book_id: String,
    /// Borrowing reader
    pub reader_id: String,
    /// Day the copy left the library
    pub borrow_date: NaiveDate,
    /// Last day the copy may be returned without a fine
    pub due_date: NaiveDate,
    /// Set exactly once, when the copy comes back
    pub returned_date: Option<NaiveDate>,
}

impl Loan {
    /// A loan is active until it has a return date
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.returned_date.is_none()
    }

    /// Current lifecycle status
    #[must_use]
    pub fn status(&self) -> LoanStatus {
        self.returned_date.map_or(LoanStatus::Active, LoanStatus::Returned)
    }

    /// Index key for this loan
    #[must_use]
    pub fn key(&self) -> LoanKey {
        LoanKey::new(self.book_id.clone(), self.reader_id.clone())
    }

    /// Active and past its due date as of `date`
    #[must_use]
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        self.is_active() && date > self.due_date
    }
}

/// Outcome of a successful return
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ReturnReceipt {
    /// Whole days past the due date, zero when on time
    pub overdue_days: i64,
    /// `overdue_days * fine_per_day`, rounded to cents
    pub fine_amount: f64,
}
