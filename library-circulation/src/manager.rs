//! The [`LibraryManager`] aggregate and its operations.

use std::{collections::HashMap, fmt};

use chrono::{Days, NaiveDate};

use crate::{
    config::LibraryConfig,
    error::{LibraryError, Result},
    events::LibraryEvent,
    fine::{FineRate, overdue_days},
    model::{Book, Loan, LoanKey, Reader, ReturnReceipt},
    observers::LibraryObserver,
};

/// In-memory circulation desk: inventory, readers and loans
pub struct LibraryManager {
    /// Fine charged per overdue day
    fine_rate: FineRate,
    /// Loan length used by [`LibraryManager::borrow_book`]
    default_loan_days: u32,
    /// Books in insertion order
    books: Vec<Book>,
    /// Position of each book in `books`, keyed by trimmed id
    book_index: HashMap<String, usize>,
    /// Readers in registration order
    readers: Vec<Reader>,
    /// Position of each reader in `readers`, keyed by trimmed id
    reader_index: HashMap<String, usize>,
    /// Open loans, pointing into `history`
    active_loans: HashMap<LoanKey, usize>,
    /// Every loan ever issued, in issue order
    history: Vec<Loan>,
    /// Registered event observers
    observers: Vec<Box<dyn LibraryObserver>>,
}

// Observers are trait objects, so Debug is written by hand
impl fmt::Debug for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryManager")
            .field("fine_rate", &self.fine_rate)
            .field("default_loan_days", &self.default_loan_days)
            .field("books", &self.books)
            .field("readers", &self.readers)
            .field("active_loans", &self.active_loans)
            .field("history", &self.history)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for LibraryManager {
    fn default() -> Self {
        let config = LibraryConfig::default();
        Self::from_parts(FineRate::DEFAULT, config.default_loan_days)
    }
}

impl LibraryManager {
    /// Create a manager charging `fine_per_day` for every overdue day
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` if `fine_per_day` is negative or not finite
    pub fn new(fine_per_day: f64) -> Result<Self> {
        Self::with_config(LibraryConfig::with_fine_per_day(fine_per_day))
    }

    /// Create a manager from validated settings
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` if the config fails [`LibraryConfig::validate`]
    pub fn with_config(config: LibraryConfig) -> Result<Self> {
        let fine_rate = config.validate()?;
        Ok(Self::from_parts(fine_rate, config.default_loan_days))
    }

    /// Build an empty manager from already-validated parts
    fn from_parts(fine_rate: FineRate, default_loan_days: u32) -> Self {
        Self {
            fine_rate,
            default_loan_days,
            books: Vec::new(),
            book_index: HashMap::new(),
            readers: Vec::new(),
            reader_index: HashMap::new(),
            active_loans: HashMap::new(),
            history: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of every successful mutation
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Fine charged per overdue day
    #[must_use]
    pub fn fine_per_day(&self) -> f64 {
        self.fine_rate.per_day()
    }

    /// Loan length used by [`LibraryManager::borrow_book`]
    #[must_use]
    pub fn default_loan_days(&self) -> u32 {
        self.default_loan_days
    }

    /// Trim `value`, rejecting it if nothing is left
    fn require_non_empty<'a>(value: &'a str, field_name: &str) -> Result<&'a str> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(LibraryError::Validation(format!("{field_name} must be non-empty")));
        }
        Ok(normalized)
    }

    /// Deliver `event` to every observer
    fn notify(&self, event: &LibraryEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Add a title with `total_copies` copies, all initially available
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank id, title or author or a
    /// zero copy count, and `LibraryError::AlreadyExists` if the id is taken
    pub fn add_book(
        &mut self,
        book_id: &str,
        title: &str,
        author: &str,
        total_copies: u32,
    ) -> Result<Book> {
        let book_id = Self::require_non_empty(book_id, "book_id")?;
        let title = Self::require_non_empty(title, "title")?;
        let author = Self::require_non_empty(author, "author")?;

        if total_copies == 0 {
            return Err(LibraryError::Validation(
                "total_copies must be greater than 0".to_string(),
            ));
        }
        if self.book_index.contains_key(book_id) {
            tracing::debug!(%book_id, "duplicate book id rejected");
            return Err(LibraryError::AlreadyExists(format!(
                "Book with id '{book_id}' already exists"
            )));
        }

        let book = Book {
            book_id: book_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            total_copies,
            available_copies: total_copies,
        };
        self.book_index.insert(book.book_id.clone(), self.books.len());
        self.books.push(book.clone());

        self.notify(&LibraryEvent::BookAdded { book_id: book.book_id.clone(), total_copies });
        Ok(book)
    }

    /// Register a new reader
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank id or name and
    /// `LibraryError::AlreadyExists` if the id is taken
    pub fn register_reader(&mut self, reader_id: &str, full_name: &str) -> Result<Reader> {
        let reader_id = Self::require_non_empty(reader_id, "reader_id")?;
        let full_name = Self::require_non_empty(full_name, "full_name")?;

        if self.reader_index.contains_key(reader_id) {
            tracing::debug!(%reader_id, "duplicate reader id rejected");
            return Err(LibraryError::AlreadyExists(format!(
                "Reader with id '{reader_id}' already exists"
            )));
        }

        let reader = Reader { reader_id: reader_id.to_string(), full_name: full_name.to_string() };
        self.reader_index.insert(reader.reader_id.clone(), self.readers.len());
        self.readers.push(reader.clone());

        self.notify(&LibraryEvent::ReaderRegistered { reader_id: reader.reader_id.clone() });
        Ok(reader)
    }

    /// Position of a book in `books`
    fn book_position(&self, book_id: &str) -> Result<usize> {
        let book_id = Self::require_non_empty(book_id, "book_id")?;
        self.book_index
            .get(book_id)
            .copied()
            .ok_or_else(|| LibraryError::NotFound(format!("Book with id '{book_id}' not found")))
    }

    /// Look up a book by id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank id and
    /// `LibraryError::NotFound` if no such book exists
    pub fn get_book(&self, book_id: &str) -> Result<&Book> {
        let position = self.book_position(book_id)?;
        self.books.get(position).ok_or_else(|| {
            LibraryError::NotFound(format!("Book with id '{}' not found", book_id.trim()))
        })
    }

    /// Look up a reader by id
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank id and
    /// `LibraryError::NotFound` if no such reader exists
    pub fn get_reader(&self, reader_id: &str) -> Result<&Reader> {
        let reader_id = Self::require_non_empty(reader_id, "reader_id")?;
        self.reader_index
            .get(reader_id)
            .and_then(|&position| self.readers.get(position))
            .ok_or_else(|| {
                LibraryError::NotFound(format!("Reader with id '{reader_id}' not found"))
            })
    }

    /// Books whose title or author contains `query`, ignoring case
    ///
    /// Results follow insertion order.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank query
    pub fn search_books(&self, query: &str) -> Result<Vec<&Book>> {
        let needle = Self::require_non_empty(query, "query")?.to_lowercase();
        Ok(self.books.iter().filter(|book| book.matches(&needle)).collect())
    }

    /// All books in insertion order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    /// All readers in registration order
    pub fn readers(&self) -> impl Iterator<Item = &Reader> {
        self.readers.iter()
    }

    /// Lend a copy for the configured default loan length
    ///
    /// # Errors
    ///
    /// See [`LibraryManager::borrow_book_for`]
    pub fn borrow_book(
        &mut self,
        book_id: &str,
        reader_id: &str,
        borrow_date: NaiveDate,
    ) -> Result<Loan> {
        self.borrow_book_for(book_id, reader_id, borrow_date, self.default_loan_days)
    }

    /// Lend a copy of `book_id` to `reader_id` for `loan_days` days
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `LibraryError::Validation` if `loan_days` is zero
    /// - `LibraryError::Validation` or `LibraryError::NotFound` for the book id
    /// - `LibraryError::Validation` or `LibraryError::NotFound` for the reader id
    /// - `LibraryError::BusinessRule` if no copy is on the shelf
    /// - `LibraryError::BusinessRule` if the reader already holds this book
    /// - `LibraryError::Validation` if the due date falls outside the calendar
    pub fn borrow_book_for(
        &mut self,
        book_id: &str,
        reader_id: &str,
        borrow_date: NaiveDate,
        loan_days: u32,
    ) -> Result<Loan> {
        if loan_days == 0 {
            return Err(LibraryError::Validation("loan_days must be greater than 0".to_string()));
        }

        let position = self.book_position(book_id)?;
        let reader_id = self.get_reader(reader_id)?.reader_id.clone();
        let book = self.get_book(book_id)?;

        let Some(remaining) = book.available_copies.checked_sub(1) else {
            tracing::debug!(book_id = %book.book_id, "no copies available");
            return Err(LibraryError::BusinessRule("No available copies for this book".to_string()));
        };

        let key = LoanKey::new(book.book_id.clone(), reader_id);
        if self.active_loans.contains_key(&key) {
            tracing::debug!(book_id = %key.book_id, reader_id = %key.reader_id, "duplicate loan");
            return Err(LibraryError::BusinessRule(
                "Reader already has this book on loan".to_string(),
            ));
        }

        let due_date = borrow_date
            .checked_add_days(Days::new(u64::from(loan_days)))
            .ok_or_else(|| LibraryError::Validation("due date is out of range".to_string()))?;

        let loan = Loan {
            book_id: key.book_id.clone(),
            reader_id: key.reader_id.clone(),
            borrow_date,
            due_date,
            returned_date: None,
        };
        self.active_loans.insert(key, self.history.len());
        self.history.push(loan.clone());
        if let Some(book) = self.books.get_mut(position) {
            book.available_copies = remaining;
        }

        self.notify(&LibraryEvent::Borrowed {
            book_id: loan.book_id.clone(),
            reader_id: loan.reader_id.clone(),
            borrow_date,
            due_date,
        });
        Ok(loan)
    }

    /// Close the active loan of `book_id` by `reader_id` and compute the fine
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for blank ids and
    /// `LibraryError::BusinessRule` if the pair has no active loan
    pub fn return_book(
        &mut self,
        book_id: &str,
        reader_id: &str,
        return_date: NaiveDate,
    ) -> Result<ReturnReceipt> {
        let key = LoanKey::new(
            Self::require_non_empty(book_id, "book_id")?,
            Self::require_non_empty(reader_id, "reader_id")?,
        );
        let not_found = || {
            LibraryError::BusinessRule(
                "Active loan for this book and reader was not found".to_string(),
            )
        };

        let Some(&history_idx) = self.active_loans.get(&key) else {
            tracing::debug!(book_id = %key.book_id, reader_id = %key.reader_id, "no active loan");
            return Err(not_found());
        };
        let due_date = self.history.get(history_idx).ok_or_else(not_found)?.due_date;
        let position = self.book_position(&key.book_id)?;
        let book = self.books.get(position).ok_or_else(not_found)?;

        // A return never puts more copies on the shelf than the library owns
        let restored = book
            .available_copies
            .checked_add(1)
            .filter(|&copies| copies <= book.total_copies)
            .ok_or_else(|| {
                tracing::error!(book_id = %book.book_id, "copy count would exceed total");
                LibraryError::BusinessRule(format!(
                    "Book '{}' has no copies on loan",
                    book.book_id
                ))
            })?;

        if let Some(loan) = self.history.get_mut(history_idx) {
            loan.returned_date = Some(return_date);
        }
        if let Some(book) = self.books.get_mut(position) {
            book.available_copies = restored;
        }
        self.active_loans.remove(&key);

        let days = overdue_days(due_date, return_date);
        let receipt =
            ReturnReceipt { overdue_days: days, fine_amount: self.fine_rate.fine_for(days) };

        self.notify(&LibraryEvent::Returned {
            book_id: key.book_id,
            reader_id: key.reader_id,
            returned_date: return_date,
            overdue_days: receipt.overdue_days,
            fine_amount: receipt.fine_amount,
        });
        Ok(receipt)
    }

    /// Fine owed for a copy due on `due_date` and returned on `return_date`
    ///
    /// Pure preview; no loan record is needed or touched.
    #[must_use]
    pub fn calculate_fine(&self, due_date: NaiveDate, return_date: NaiveDate) -> f64 {
        self.fine_rate.fine_between(due_date, return_date)
    }

    /// Positions in `history` of active loans, in issue order
    fn active_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.active_loans.values().copied().collect();
        positions.sort_unstable();
        positions
    }

    /// Snapshot of every open loan, in issue order
    #[must_use]
    pub fn get_active_loans(&self) -> Vec<Loan> {
        self.active_positions()
            .into_iter()
            .filter_map(|position| self.history.get(position))
            .cloned()
            .collect()
    }

    /// Snapshot of the open loans held by `reader_id`
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` for a blank id and
    /// `LibraryError::NotFound` if no such reader exists
    pub fn get_reader_active_loans(&self, reader_id: &str) -> Result<Vec<Loan>> {
        let reader_id = self.get_reader(reader_id)?.reader_id.as_str();
        Ok(self
            .get_active_loans()
            .into_iter()
            .filter(|loan| loan.reader_id == reader_id)
            .collect())
    }

    /// Snapshot of open loans already past due on `as_of`
    #[must_use]
    pub fn get_overdue_loans(&self, as_of: NaiveDate) -> Vec<Loan> {
        self.get_active_loans().into_iter().filter(|loan| loan.is_overdue_on(as_of)).collect()
    }

    /// Snapshot of every loan ever issued, in issue order
    #[must_use]
    pub fn get_loan_history(&self) -> Vec<Loan> {
        self.history.clone()
    }
}
