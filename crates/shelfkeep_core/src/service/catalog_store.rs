//! Catalog store use-case service.
//!
//! # Responsibility
//! - Hold the ordered book list loaded from the backing document.
//! - Provide add/search/issue/return/list entry points for callers.
//!
//! # Invariants
//! - Insertion order is preserved for listing and search results.
//! - Memory and disk are synchronized after every mutation; a failed write
//!   rolls the in-memory change back.
//! - Rejected issue/return calls change nothing and write nothing.
//! - Duplicate ISBNs are accepted; lookups resolve to the first match.

use crate::model::book::{Book, BookState};
use crate::store::{
    load_catalog, save_catalog, LoadOutcome, StoreError, StoreResult, DEFAULT_CATALOG_PATH,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failure of an issue/return request or its persistence.
#[derive(Debug)]
pub enum CatalogError {
    /// No book carries the requested ISBN.
    NotFound(String),
    /// The book exists but is not in a state that allows the transition.
    InvalidState { isbn: String, state: BookState },
    Store(StoreError),
}

impl CatalogError {
    /// Returns whether the request was rejected without touching storage.
    ///
    /// Collapses `NotFound` and `InvalidState` into one pass/fail outcome for
    /// callers that do not need to tell them apart.
    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidState { .. })
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(isbn) => write!(f, "book not found: {isbn}"),
            Self::InvalidState { isbn, state } => {
                write!(f, "book {isbn} is already {}", state.to_string().to_lowercase())
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::InvalidState { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// In-memory catalog bound to one backing JSON document.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    books: Vec<Book>,
    load_outcome: LoadOutcome,
}

impl CatalogStore {
    /// Opens the catalog at `path`, creating or resetting the document when
    /// it is missing or unreadable.
    ///
    /// Check `load_outcome()` to find out whether prior content was discarded.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let loaded = load_catalog(&path)?;
        Ok(Self {
            path,
            books: loaded.books,
            load_outcome: loaded.outcome,
        })
    }

    /// Opens the catalog at `data/catalog.json`.
    pub fn open_default() -> StoreResult<Self> {
        Self::open(DEFAULT_CATALOG_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Writes the full book list to the backing document.
    pub fn save(&self) -> StoreResult<()> {
        save_catalog(&self.path, &self.books)
    }

    /// Appends `book` and persists.
    ///
    /// No duplicate or field validation is performed. The book is not kept
    /// when the write fails.
    pub fn add_book(&mut self, book: Book) -> StoreResult<()> {
        info!("event=book_add module=service status=start isbn={}", book.isbn);
        self.books.push(book);
        if let Err(err) = self.save() {
            self.books.pop();
            return Err(err);
        }
        Ok(())
    }

    /// Returns the first book whose ISBN equals `isbn`.
    pub fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    /// Returns every book whose title contains `keyword`, ignoring case.
    ///
    /// An empty keyword matches every book.
    pub fn search_by_title(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(needle.as_str()))
            .collect()
    }

    /// Issues the first book with `isbn` and persists.
    ///
    /// # Errors
    /// - `NotFound` when no book has this ISBN.
    /// - `InvalidState` when the book is already issued.
    /// - `Store` when the write fails.
    pub fn issue_book(&mut self, isbn: &str) -> CatalogResult<()> {
        self.transition(isbn, BookState::Available, Book::issue, "book_issue")
    }

    /// Returns the first book with `isbn` to the shelf and persists.
    ///
    /// # Errors
    /// - `NotFound` when no book has this ISBN.
    /// - `InvalidState` when the book is already available.
    /// - `Store` when the write fails.
    pub fn return_book(&mut self, isbn: &str) -> CatalogResult<()> {
        self.transition(isbn, BookState::Issued, Book::return_book, "book_return")
    }

    /// Returns all books in insertion order.
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    fn transition(
        &mut self,
        isbn: &str,
        required: BookState,
        apply: fn(&mut Book),
        event: &str,
    ) -> CatalogResult<()> {
        let Some(index) = self.books.iter().position(|book| book.isbn == isbn) else {
            info!("event={event} module=service status=rejected reason=not_found isbn={isbn}");
            return Err(CatalogError::NotFound(isbn.to_string()));
        };

        let book = &mut self.books[index];
        let state = book.state();
        if state != required {
            info!("event={event} module=service status=rejected reason=invalid_state isbn={isbn} state={state}");
            return Err(CatalogError::InvalidState {
                isbn: isbn.to_string(),
                state,
            });
        }

        apply(book);
        if let Err(err) = self.save() {
            let book = &mut self.books[index];
            match state {
                BookState::Available => book.return_book(),
                BookState::Issued => book.issue(),
            }
            return Err(err.into());
        }
        info!("event={event} module=service status=ok isbn={isbn}");
        Ok(())
    }
}
