//! Book use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for presentation callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookId, BookPatch, NewBook};
use crate::repo::book_repo::{BookRepository, RepoResult};

/// Use-case service wrapper for book CRUD operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a book from a validated typed input.
    pub fn create_book(&self, input: &NewBook) -> RepoResult<Book> {
        self.repo.create_book(input)
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: BookId) -> RepoResult<Book> {
        self.repo.get_book(id)
    }

    /// Lists the full catalog ordered by id.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Applies a patch to one book and returns the updated record.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn edit_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        self.repo.update_book(id, patch)
    }

    /// Deletes one book by id. Returns whether a record existed.
    pub fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        self.repo.delete_book(id)
    }
}
