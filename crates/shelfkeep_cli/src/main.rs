//! Command-line front end for the shelfkeep catalog.
//!
//! # Responsibility
//! - Map one subcommand per invocation onto `CatalogStore` operations.
//! - Own all user-facing message text.
//!
//! Usage:
//!   shelfkeep add "Dune" "Frank Herbert" 9780441013593
//!   shelfkeep --catalog /tmp/catalog.json issue 9780441013593
//!   shelfkeep search dune

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shelfkeep_core::{
    core_version, default_log_level, init_logging, Book, CatalogError, CatalogStore, LoadOutcome,
    DEFAULT_CATALOG_PATH,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "shelfkeep")]
#[command(about = "Manage a JSON-backed library catalog")]
struct Cli {
    /// Backing catalog document.
    #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
    catalog: PathBuf,
    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,
    /// trace|debug|info|warn|error. Defaults to debug in debug builds, info otherwise.
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new, available book.
    Add {
        title: String,
        author: String,
        isbn: String,
    },
    /// Mark a book as issued.
    Issue { isbn: String },
    /// Mark an issued book as returned.
    Return { isbn: String },
    /// Print every book in insertion order.
    List,
    /// Print books whose title contains a keyword (case-insensitive).
    Search { keyword: String },
    /// Print the core version.
    Version,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("initializing logging")?;
    }

    run(&cli.catalog, cli.command)
}

fn open_store(catalog: &Path) -> Result<CatalogStore> {
    let store = CatalogStore::open(catalog)
        .with_context(|| format!("opening catalog {}", catalog.display()))?;
    if let LoadOutcome::Recovered { reason } = store.load_outcome() {
        eprintln!(
            "warning: catalog {} was reset to empty ({reason})",
            store.path().display()
        );
    }
    Ok(store)
}

fn run(catalog: &Path, command: Command) -> Result<ExitCode> {
    match command {
        Command::Add {
            title,
            author,
            isbn,
        } => {
            open_store(catalog)?
                .add_book(Book::new(title, author, isbn))
                .context("saving catalog")?;
            println!("Book added successfully!");
        }
        Command::Issue { isbn } => {
            let result = open_store(catalog)?.issue_book(&isbn);
            return print_transition(transition_outcome(
                result,
                "Book issued!",
                "Book not available or not found.",
            ));
        }
        Command::Return { isbn } => {
            let result = open_store(catalog)?.return_book(&isbn);
            return print_transition(transition_outcome(
                result,
                "Book returned!",
                "Book not found or already available.",
            ));
        }
        Command::List => {
            let store = open_store(catalog)?;
            if store.is_empty() {
                println!("Catalog is empty.");
            }
            for book in store.list_all() {
                println!("{book}");
            }
        }
        Command::Search { keyword } => {
            let store = open_store(catalog)?;
            let hits = store.search_by_title(&keyword);
            if hits.is_empty() {
                println!("No books found.");
            }
            for book in hits {
                println!("{book}");
            }
        }
        Command::Version => {
            println!("shelfkeep_core version={}", core_version());
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_transition(outcome: Result<(&'static str, ExitCode)>) -> Result<ExitCode> {
    let (message, code) = outcome?;
    println!("{message}");
    Ok(code)
}

/// Maps an issue/return result onto the message to print and the exit code.
///
/// Rejections are reported, not raised; only write failures become errors.
fn transition_outcome(
    result: Result<(), CatalogError>,
    success: &'static str,
    rejected: &'static str,
) -> Result<(&'static str, ExitCode)> {
    match result {
        Ok(()) => Ok((success, ExitCode::SUCCESS)),
        Err(err) if err.is_not_applicable() => {
            log::debug!("event=cli_transition module=cli status=rejected reason={err}");
            Ok((rejected, ExitCode::FAILURE))
        }
        Err(err) => Err(anyhow::Error::new(err).context("saving catalog")),
    }
}
