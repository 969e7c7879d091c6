//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory catalog and route every mutation through persistence.
//! - Keep callers decoupled from document storage details.

pub mod catalog_store;
