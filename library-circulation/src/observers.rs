//! Observers that react to [`crate::LibraryEvent`]s.

use std::cell::RefCell;

use crate::events::LibraryEvent;

/// Trait for library event observation
pub trait LibraryObserver {
    /// Called after a mutation has been applied
    fn on_event(&self, event: &LibraryEvent);
}

/// Logs every event through `tracing`
#[derive(Debug)]
pub struct TracingObserver;

impl LibraryObserver for TracingObserver {
    fn on_event(&self, event: &LibraryEvent) {
        match event {
            LibraryEvent::BookAdded { book_id, total_copies } => {
                tracing::info!(%book_id, total_copies, "book added");
            }
            LibraryEvent::ReaderRegistered { reader_id } => {
                tracing::info!(%reader_id, "reader registered");
            }
            LibraryEvent::Borrowed { book_id, reader_id, borrow_date, due_date } => {
                tracing::info!(%book_id, %reader_id, %borrow_date, %due_date, "book borrowed");
            }
            LibraryEvent::Returned {
                book_id,
                reader_id,
                returned_date,
                overdue_days,
                fine_amount,
            } => {
                tracing::info!(
                    %book_id,
                    %reader_id,
                    %returned_date,
                    overdue_days,
                    fine_amount,
                    "book returned"
                );
            }
        }
    }
}

/// A fined return, as collected by [`OverdueNotifier`]
#[derive(Debug, Clone, PartialEq)]
pub struct OverdueNotice {
    /// Returned book
    pub book_id: String,
    /// Reader who owes the fine
    pub reader_id: String,
    /// Days past the due date
    pub overdue_days: i64,
    /// Amount owed
    pub fine_amount: f64,
}

/// Collects a notice for every late return
#[derive(Debug, Default)]
pub struct OverdueNotifier {
    /// Notices in the order the returns happened
    notices: RefCell<Vec<OverdueNotice>>,
}

impl OverdueNotifier {
    /// Create an empty notifier
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notice collected so far
    pub fn drain(&self) -> Vec<OverdueNotice> {
        self.notices.take()
    }
}

impl LibraryObserver for OverdueNotifier {
    fn on_event(&self, event: &LibraryEvent) {
        if let LibraryEvent::Returned { book_id, reader_id, overdue_days, fine_amount, .. } =
            event
        {
            if *overdue_days > 0 {
                tracing::warn!(%book_id, %reader_id, overdue_days, fine_amount, "late return");
                self.notices.borrow_mut().push(OverdueNotice {
                    book_id: book_id.clone(),
                    reader_id: reader_id.clone(),
                    overdue_days: *overdue_days,
                    fine_amount: *fine_amount,
                });
            }
        }
    }
}

impl<T: LibraryObserver + ?Sized> LibraryObserver for std::rc::Rc<T> {
    fn on_event(&self, event: &LibraryEvent) {
        (**self).on_event(event);
    }
}
