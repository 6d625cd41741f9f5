use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use library_circulation::LibraryManager;

/// Build a library with `books` titles and a single reader
fn populated_library(books: usize) -> LibraryManager {
    let mut library = LibraryManager::new(1.5).unwrap_or_default();
    for i in 0..books {
        let id = format!("B-{i:05}");
        let title = format!("Volume {i} of the Collected Works");
        drop(library.add_book(&id, &title, "Various Authors", 3));
    }
    drop(library.register_reader("R-1", "Benchmark Reader"));
    library
}

fn bench_borrow_return(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap_or_default();

    c.bench_function("borrow_then_return", |b| {
        b.iter_batched(
            || populated_library(100),
            |mut library| {
                drop(library.borrow_book(black_box("B-00050"), black_box("R-1"), start));
                library.return_book(black_box("B-00050"), black_box("R-1"), end)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_search(c: &mut Criterion) {
    let library = populated_library(1_000);

    c.bench_function("search_books_1000", |b| {
        b.iter(|| library.search_books(black_box("volume 99")).map(|found| found.len()));
    });
}

criterion_group!(benches, bench_borrow_return, bench_search);
criterion_main!(benches);
