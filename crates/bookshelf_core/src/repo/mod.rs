//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the catalog's data access contract.
//! - Isolate SQLite query details from service/presentation orchestration.
//!
//! # Invariants
//! - Repository writes validate inputs before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod book_repo;
