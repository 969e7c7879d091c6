//! Catalog document load/save.
//!
//! # Responsibility
//! - Deserialize the book list from disk, creating or resetting it as needed.
//! - Serialize the full book list back to disk after mutations.
//!
//! # Invariants
//! - Missing documents are created as `[]` before the catalog is used.
//! - Unreadable documents emit a `warn` event before being overwritten.
//! - Writes truncate the file; a crash mid-write may leave it truncated.

use super::{StoreError, StoreResult};
use crate::model::book::Book;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

/// Backing file used when no path is supplied.
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";

const JSON_INDENT: &[u8] = b"    ";

/// How the catalog document was brought into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Existing document parsed successfully.
    Loaded,
    /// No document existed; an empty one was written.
    Created,
    /// Document existed but could not be read or parsed. Its content was
    /// discarded and replaced with an empty document.
    Recovered { reason: String },
}

/// Books read from disk together with the load outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCatalog {
    pub books: Vec<Book>,
    pub outcome: LoadOutcome,
}

/// Loads the catalog document at `path`.
///
/// # Side effects
/// - Writes `[]` to `path` when the file is missing or unreadable.
/// - Emits `catalog_load` logging events.
///
/// # Errors
/// - Returns `StoreError` only when writing the replacement document fails.
pub fn load_catalog(path: &Path) -> StoreResult<LoadedCatalog> {
    info!(
        "event=catalog_load module=store status=start path={}",
        path.display()
    );

    let read_result = std::fs::read_to_string(path);
    let reason = match read_result {
        Ok(text) => match serde_json::from_str::<Vec<Book>>(&text) {
            Ok(books) => {
                info!(
                    "event=catalog_load module=store status=ok path={} count={}",
                    path.display(),
                    books.len()
                );
                return Ok(LoadedCatalog {
                    books,
                    outcome: LoadOutcome::Loaded,
                });
            }
            Err(err) => format!("invalid catalog document: {err}"),
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            save_catalog(path, &[])?;
            info!(
                "event=catalog_load module=store status=created path={}",
                path.display()
            );
            return Ok(LoadedCatalog {
                books: Vec::new(),
                outcome: LoadOutcome::Created,
            });
        }
        Err(err) => format!("unreadable catalog file: {err}"),
    };

    warn!(
        "event=catalog_load module=store status=recovered path={} reason={}",
        path.display(),
        reason
    );
    save_catalog(path, &[])?;
    Ok(LoadedCatalog {
        books: Vec::new(),
        outcome: LoadOutcome::Recovered { reason },
    })
}

/// Overwrites the document at `path` with `books`.
///
/// Output is a pretty-printed JSON array with 4-space indentation. Missing
/// parent directories are created.
///
/// # Errors
/// - Returns `StoreError::Io` when directories or the file cannot be written.
pub fn save_catalog(path: &Path, books: &[Book]) -> StoreResult<()> {
    let started_at = Instant::now();

    match write_document(path, books) {
        Ok(()) => {
            info!(
                "event=catalog_save module=store status=ok path={} count={} duration_ms={}",
                path.display(),
                books.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=catalog_save module=store status=error path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn write_document(path: &Path, books: &[Book]) -> StoreResult<()> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    books.serialize(&mut serializer)?;

    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(path, buf).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
