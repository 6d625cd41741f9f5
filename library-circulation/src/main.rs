use std::{path::PathBuf, process::ExitCode, rc::Rc};

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use library_circulation::{
    ErrorKind, LibraryConfig, LibraryError, LibraryManager, LibraryReport, OverdueNotifier,
    TracingObserver,
};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the circulation demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with `fine_per_day` and `default_loan_days`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fine charged per overdue day (overrides the config file)
    #[arg(long)]
    fine_per_day: Option<f64>,

    /// Default loan length in days (overrides the config file)
    #[arg(long)]
    loan_days: Option<u32>,

    /// Log every library event at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Fine rate the demo uses when neither a flag nor a file sets one
const DEMO_FINE_PER_DAY: f64 = 15.0;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Configuration error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", describe(&e).red().bold(), e.message());
            ExitCode::FAILURE
        }
    }
}

/// Install a `tracing` subscriber honoring `RUST_LOG`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Merge defaults, the optional config file and command-line overrides
fn load_config(args: &Args) -> Result<LibraryConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => LibraryConfig::from_file(path)?,
        None => LibraryConfig::with_fine_per_day(DEMO_FINE_PER_DAY),
    };
    if let Some(fine_per_day) = args.fine_per_day {
        config.fine_per_day = fine_per_day;
    }
    if let Some(loan_days) = args.loan_days {
        config.default_loan_days = loan_days;
    }
    config.validate()?;
    Ok(config)
}

/// Heading shown for each error kind
fn describe(error: &LibraryError) -> &'static str {
    match error.kind() {
        ErrorKind::Validation => "Invalid input:",
        ErrorKind::NotFound => "Not found:",
        ErrorKind::AlreadyExists => "Already exists:",
        ErrorKind::BusinessRule => "Not allowed:",
    }
}

/// Build a calendar date from literal parts
fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, LibraryError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LibraryError::Validation(format!("invalid date {year}-{month}-{day}")))
}

/// Walk through a borrow, a late return and a search
fn run(config: LibraryConfig) -> Result<(), LibraryError> {
    let mut library = LibraryManager::with_config(config)?;
    let notifier = Rc::new(OverdueNotifier::new());
    library.register_observer(Box::new(TracingObserver));
    library.register_observer(Box::new(Rc::clone(&notifier)));

    library.add_book("B-001", "Clean Code", "Robert C. Martin", 2)?;
    library.add_book("B-002", "The Pragmatic Programmer", "Andrew Hunt", 1)?;
    library.register_reader("R-001", "Ivan Petrov")?;
    library.register_reader("R-002", "Anna Sidorova")?;

    let loan = library.borrow_book_for("B-001", "R-001", date(2026, 2, 1)?, 7)?;
    let receipt = library.return_book("B-001", "R-001", date(2026, 2, 12)?)?;

    println!("{}", "=== Mini Library ===".green().bold());
    println!("Borrowed: book={}, reader={}, due={}", loan.book_id, loan.reader_id, loan.due_date);
    println!("Returned with overdue days: {}", receipt.overdue_days);
    println!("Fine amount: {:.2}", receipt.fine_amount);

    let found: Vec<&str> =
        library.search_books("pragmatic")?.into_iter().map(|book| book.title.as_str()).collect();
    println!("Search result for 'pragmatic': {found:?}");

    // Show how each rule surfaces to a caller
    library.borrow_book("B-002", "R-002", date(2026, 2, 15)?)?;
    println!("\n{}", "=== Rule checks ===".yellow().bold());
    for attempt in [
        library.borrow_book("B-002", "R-001", date(2026, 2, 16)?).map(|_| ()),
        library.return_book("B-001", "R-002", date(2026, 2, 16)?).map(|_| ()),
        library.get_book("   ").map(|_| ()),
        library.get_book("UNKNOWN").map(|_| ()),
    ] {
        if let Err(e) = attempt {
            println!("{} {}", describe(&e).cyan(), e.message());
        }
    }

    println!("\n{}", "=== Inventory ===".yellow().bold());
    print!("{}", LibraryReport::inventory_table(&library));
    println!("\n{}", "=== Readers ===".yellow().bold());
    print!("{}", LibraryReport::reader_roster(&library));
    println!("\n{}", "=== Loan history ===".yellow().bold());
    print!("{}", LibraryReport::history_table(&library.get_loan_history()));
    println!("\n{}", LibraryReport::overdue_summary(&library, date(2026, 3, 15)?));

    for notice in notifier.drain() {
        println!(
            "{} {} owes {:.2} for returning {} {} day(s) late",
            "Notice:".magenta().bold(),
            notice.reader_id,
            notice.fine_amount,
            notice.book_id,
            notice.overdue_days
        );
    }

    Ok(())
}
