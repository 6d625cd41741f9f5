//! Events emitted after each successful mutation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A successful change to library state, delivered to observers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A title entered the inventory
    BookAdded {
        /// New book id
        book_id: String,
        /// Number of copies added
        total_copies: u32,
    },
    /// A reader was registered
    ReaderRegistered {
        /// New reader id
        reader_id: String,
    },
    /// A copy was lent out
    Borrowed {
        /// Borrowed book
        book_id: String,
        /// Borrowing reader
        reader_id: String,
        /// Day of issue
        borrow_date: NaiveDate,
        /// Day the copy is due back
        due_date: NaiveDate,
    },
    /// A copy came back
    Returned {
        /// Returned book
        book_id: String,
        /// Returning reader
        reader_id: String,
        /// Day of return
        returned_date: NaiveDate,
        /// Days past the due date
        overdue_days: i64,
        /// Fine charged for the return
        fine_amount: f64,
    },
}
