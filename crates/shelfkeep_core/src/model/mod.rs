//! Domain model for catalog entries.
//!
//! # Responsibility
//! - Define the canonical book record persisted by the catalog.
//! - Keep availability transitions on the entity itself.
//!
//! # Invariants
//! - Every book is identified by its `isbn` text.
//! - Books are never removed; only availability changes.

pub mod book;
