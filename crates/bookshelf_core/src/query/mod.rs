//! Read-only catalog queries and aggregates.
//!
//! # Responsibility
//! - Answer filter, sort, phrase-search and statistics queries over the
//!   `books` table.
//! - Keep every operation a single database-side pass.
//!
//! # Invariants
//! - Nothing in this module mutates the store.
//! - Result ordering is deterministic (id or title+id keys).

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod stats;

pub type QueryResult<T> = Result<T, QueryError>;

/// Query-layer error for argument checks, DB interaction and row decoding.
#[derive(Debug)]
pub enum QueryError {
    /// Phrase parameter is empty after trimming.
    EmptyPhrase,
    Db(DbError),
    InvalidData(String),
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPhrase => write!(f, "search phrase must not be empty"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid catalog row: {message}"),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for QueryError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for QueryError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
