//! Core domain logic for the Bookshelf catalog.
//! This crate is the single source of truth for business invariants.

pub mod batch;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use batch::{
    delete_books_by_author, update_year_for_ids, BatchError, BatchResult, YearUpdateRequest,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
pub use query::catalog::{
    filter_by_author_length, filter_by_genre, search_by_phrase, sort_by_title, SortOrder,
};
pub use query::stats::{catalog_statistics, count_by_genre, CatalogStats};
pub use query::{QueryError, QueryResult};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use service::book_service::BookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
