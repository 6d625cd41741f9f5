//! In-memory library circulation tracker.
//!
//! [`LibraryManager`] owns the book inventory, the reader registry and every
//! loan ever issued. It enforces copy availability, allows one open loan per
//! book and reader, and charges a per-day fine for late returns.

pub mod config;
pub mod error;
pub mod events;
pub mod fine;
pub mod loan_status;
pub mod manager;
pub mod model;
pub mod observers;
pub mod report;

pub use config::{ConfigError, LibraryConfig};
pub use error::{ErrorKind, LibraryError, Result};
pub use events::LibraryEvent;
pub use fine::FineRate;
pub use loan_status::LoanStatus;
pub use manager::LibraryManager;
pub use model::{Book, Loan, LoanKey, Reader, ReturnReceipt};
pub use observers::{LibraryObserver, OverdueNotice, OverdueNotifier, TracingObserver};
pub use report::LibraryReport;
