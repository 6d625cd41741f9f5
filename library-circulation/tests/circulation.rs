//! End-to-end circulation scenarios through the public API.

#![allow(clippy::expect_used, clippy::float_cmp, clippy::indexing_slicing)]

use chrono::NaiveDate;
use library_circulation::{ErrorKind, LibraryManager, LoanStatus};
use rstest::{fixture, rstest};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[fixture]
fn library() -> LibraryManager {
    let mut library = LibraryManager::new(10.0).expect("valid fine rate");
    library.add_book("B1", "Clean Code", "Robert Martin", 2).expect("add B1");
    library.add_book("B2", "The Pragmatic Programmer", "Andrew Hunt", 1).expect("add B2");
    library.register_reader("R1", "Ivan Petrov").expect("register R1");
    library.register_reader("R2", "Anna Sidorova").expect("register R2");
    library
}

#[rstest]
fn late_return_scenario(mut library: LibraryManager) {
    let loan = library.borrow_book_for("B2", "R2", date(2026, 3, 1), 7).expect("borrow");
    assert_eq!(loan.due_date, date(2026, 3, 8));

    let receipt = library.return_book("B2", "R2", date(2026, 3, 10)).expect("return");
    assert_eq!(receipt.overdue_days, 2);
    assert_eq!(receipt.fine_amount, 20.0);
    assert_eq!(library.get_active_loans().len(), 0);
    assert_eq!(library.get_book("B2").expect("B2").available_copies, 1);

    let history = library.get_loan_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status(), LoanStatus::Returned(date(2026, 3, 10)));
}

#[rstest]
#[case::same_day(date(2026, 4, 10), 0.0)]
#[case::early(date(2026, 4, 2), 0.0)]
#[case::three_days(date(2026, 4, 13), 30.0)]
#[case::next_month(date(2026, 5, 10), 300.0)]
fn fine_preview(library: LibraryManager, #[case] returned: NaiveDate, #[case] expected: f64) {
    assert_eq!(library.calculate_fine(date(2026, 4, 10), returned), expected);
}

#[rstest]
#[case::blank_book("   ", ErrorKind::Validation)]
#[case::unknown_book("UNKNOWN", ErrorKind::NotFound)]
fn get_book_errors(library: LibraryManager, #[case] id: &str, #[case] kind: ErrorKind) {
    assert_eq!(library.get_book(id).expect_err("lookup fails").kind(), kind);
}

#[rstest]
#[case::zero_days("B1", "R1", 0, ErrorKind::Validation)]
#[case::unknown_book("B9", "R1", 7, ErrorKind::NotFound)]
#[case::unknown_reader("B1", "R9", 7, ErrorKind::NotFound)]
#[case::blank_reader("B1", " ", 7, ErrorKind::Validation)]
fn borrow_rejections(
    mut library: LibraryManager,
    #[case] book_id: &str,
    #[case] reader_id: &str,
    #[case] loan_days: u32,
    #[case] kind: ErrorKind,
) {
    let err = library
        .borrow_book_for(book_id, reader_id, date(2026, 1, 1), loan_days)
        .expect_err("borrow is rejected");
    assert_eq!(err.kind(), kind);
    assert!(library.get_loan_history().is_empty());
    assert_eq!(library.get_book("B1").expect("B1").available_copies, 2);
}

#[rstest]
fn availability_stays_in_bounds(mut library: LibraryManager) {
    let readers = ["R1", "R2", "R3", "R4"];
    for reader in &readers[2..] {
        library.register_reader(reader, "Guest").expect("register guest");
    }

    // Interleave successful and rejected operations over a few weeks
    for day in 1..=28_u32 {
        let today = date(2026, 2, day);
        for (i, reader) in readers.iter().enumerate() {
            let book = if (day as usize + i) % 2 == 0 { "B1" } else { "B2" };
            if (day as usize + i) % 3 == 0 {
                drop(library.return_book(book, reader, today));
            } else {
                drop(library.borrow_book_for(book, reader, today, 5));
            }

            for book in library.books() {
                assert!(book.available_copies <= book.total_copies);
            }
        }

        let active = library.get_active_loans();
        let mut keys: Vec<_> = active.iter().map(|loan| loan.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), active.len(), "one open loan per book and reader");

        for book in library.books() {
            let out = active.iter().filter(|loan| loan.book_id == book.book_id).count();
            assert_eq!(out + book.available_copies as usize, book.total_copies as usize);
        }
    }
}

#[rstest]
fn returned_loan_cannot_be_returned_again(mut library: LibraryManager) {
    library.borrow_book("B1", "R1", date(2026, 1, 1)).expect("borrow");
    library.return_book("B1", "R1", date(2026, 1, 20)).expect("return");

    let err = library.return_book("B1", "R1", date(2026, 1, 21)).expect_err("already returned");
    assert_eq!(err.kind(), ErrorKind::BusinessRule);
    assert_eq!(library.get_loan_history()[0].returned_date, Some(date(2026, 1, 20)));
}

#[test]
fn loans_serialize_to_json() {
    let mut library = LibraryManager::default();
    library.add_book("B1", "Clean Code", "Robert Martin", 1).expect("add");
    library.register_reader("R1", "Ivan Petrov").expect("register");
    library.borrow_book_for("B1", "R1", date(2026, 6, 1), 10).expect("borrow");

    let json = serde_json::to_value(library.get_loan_history()).expect("serialize");
    assert_eq!(json[0]["book_id"], "B1");
    assert_eq!(json[0]["due_date"], "2026-06-11");
    assert!(json[0]["returned_date"].is_null());
}
