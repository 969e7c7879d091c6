//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog entry and its availability flag.
//! - Provide issue/return helpers without precondition checks.
//!
//! # Invariants
//! - `isbn` is the lookup key, but uniqueness is not enforced here.
//! - `available` is the source of truth for `BookState`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Circulation state derived from `Book::available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookState {
    /// On the shelf and can be issued.
    Available,
    /// Borrowed; must be returned before it can be issued again.
    Issued,
}

impl Display for BookState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "Available"),
            Self::Issued => write!(f, "Issued"),
        }
    }
}

/// One catalog entry.
///
/// Serialized as a flat object with `title`, `author`, `isbn` and
/// `available` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    /// Records written without this key load as available.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Book {
    /// Creates an available book.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            available: true,
        }
    }

    /// Marks this book as borrowed.
    ///
    /// Callers are responsible for checking `is_available()` first.
    pub fn issue(&mut self) {
        self.available = false;
    }

    /// Marks this book as back on the shelf.
    pub fn return_book(&mut self) {
        self.available = true;
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Returns the circulation state projected from the availability flag.
    pub fn state(&self) -> BookState {
        if self.available {
            BookState::Available
        } else {
            BookState::Issued
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} (ISBN: {}) - {}",
            self.title,
            self.author,
            self.isbn,
            self.state()
        )
    }
}
