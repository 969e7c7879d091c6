//! JSON catalog document storage.
//!
//! # Responsibility
//! - Read and write the backing JSON document for the catalog.
//! - Apply the load recovery policy for missing or unreadable documents.
//!
//! # Invariants
//! - The document is always a JSON array of book objects.
//! - Every save rewrites the whole document; there is no partial update.
//! - A document that cannot be loaded is reported, then reset to `[]`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{load_catalog, save_catalog, LoadOutcome, LoadedCatalog, DEFAULT_CATALOG_PATH};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "catalog file `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize catalog: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
