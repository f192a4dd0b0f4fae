//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define the canonical record and the typed write inputs used by core
//!   business logic.
//!
//! # Invariants
//! - Every record is identified by a stable store-assigned `BookId`.
//! - Write inputs are validated before they reach persistence.

pub mod book;
