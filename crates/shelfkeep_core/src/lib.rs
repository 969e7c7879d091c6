//! Core catalog logic for shelfkeep.
//! This crate owns the book model, the JSON backing document and every
//! catalog mutation.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookState};
pub use service::catalog_store::{CatalogError, CatalogResult, CatalogStore};
pub use store::{LoadOutcome, StoreError, StoreResult, DEFAULT_CATALOG_PATH};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
