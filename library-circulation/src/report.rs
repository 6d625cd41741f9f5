//! Plain-text reports over library state.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::{
    manager::LibraryManager,
    model::{Book, Loan},
};

/// Text summaries of library state
#[derive(Debug)]
pub struct LibraryReport;

impl LibraryReport {
    /// Generate a markdown table of the inventory
    #[must_use]
    pub fn inventory_table(library: &LibraryManager) -> String {
        let books: Vec<&Book> = library.books().collect();
        if books.is_empty() {
            return "No books in the inventory.".to_string();
        }

        let mut table = String::from("| Id | Title | Author | Available |\n");
        table.push_str("|----|-------|--------|-----------|\n");
        for book in books {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {}/{} |",
                book.book_id, book.title, book.author, book.available_copies, book.total_copies
            );
        }
        table
    }

    /// One line per registered reader with the number of books they hold
    #[must_use]
    pub fn reader_roster(library: &LibraryManager) -> String {
        let active = library.get_active_loans();
        let mut roster = String::new();
        for reader in library.readers() {
            let holding = active.iter().filter(|loan| loan.reader_id == reader.reader_id).count();
            let _ = writeln!(
                roster,
                "{} ({}): {holding} book(s) on loan",
                reader.full_name, reader.reader_id
            );
        }
        if roster.is_empty() {
            return "No readers registered.".to_string();
        }
        roster
    }

    /// Generate a markdown table of loans, numbered in the given order
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn history_table(loans: &[Loan]) -> String {
        if loans.is_empty() {
            return "No loans recorded yet.".to_string();
        }

        let mut table = String::from("| # | Book | Reader | Borrowed | Due | Status |\n");
        table.push_str("|---|------|--------|----------|-----|--------|\n");
        for (i, loan) in loans.iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {} |",
                i + 1,
                loan.book_id,
                loan.reader_id,
                loan.borrow_date,
                loan.due_date,
                loan.status().get_description()
            );
        }
        table
    }

    /// One line per loan still out past its due date on `as_of`
    #[must_use]
    pub fn overdue_summary(library: &LibraryManager, as_of: NaiveDate) -> String {
        let overdue = library.get_overdue_loans(as_of);
        if overdue.is_empty() {
            return format!("No overdue loans as of {as_of}.");
        }

        let mut summary = format!("Overdue loans as of {as_of}:\n");
        for loan in overdue {
            let fine = library.calculate_fine(loan.due_date, as_of);
            let _ = writeln!(
                summary,
                "  {} held by {} since {} (due {}), fine so far {fine:.2}",
                loan.book_id, loan.reader_id, loan.borrow_date, loan.due_date
            );
        }
        summary
    }
}
