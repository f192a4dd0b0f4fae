//! Set-based catalog mutations.
//!
//! # Responsibility
//! - Apply one-statement bulk updates and deletes matched by id set or
//!   author value.
//! - Report affected-row counts back to the caller.
//!
//! # Invariants
//! - Each operation is a single SQL statement; atomicity beyond what the
//!   store guarantees for one statement is not promised.
//! - An empty id set is a no-op, not an error.
//! - Log events carry counts only, never user-entered text.

use crate::db::DbError;
use crate::model::book::BookId;
use log::info;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BatchResult<T> = Result<T, BatchError>;

/// Batch-mutation error for argument checks and DB interaction.
#[derive(Debug)]
pub enum BatchError {
    /// Author parameter is empty.
    EmptyAuthor,
    Db(DbError),
}

impl Display for BatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyAuthor => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for BatchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BatchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Typed input for the batch year update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearUpdateRequest {
    /// Ids to update; ids with no matching row are silently skipped.
    pub ids: Vec<BookId>,
    /// Year written to every matched row.
    pub year: i32,
}

/// Sets `year` on every book whose id is in the request set.
///
/// Returns the number of rows updated: 0 when the set is empty or matches
/// nothing.
pub fn update_year_for_ids(conn: &Connection, request: &YearUpdateRequest) -> BatchResult<usize> {
    if request.ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; request.ids.len()].join(", ");
    let sql = format!("UPDATE books SET year = ? WHERE id IN ({placeholders});");

    let mut bind_values: Vec<Value> = Vec::with_capacity(request.ids.len() + 1);
    bind_values.push(Value::Integer(i64::from(request.year)));
    for id in &request.ids {
        bind_values.push(Value::Integer(*id));
    }

    let changed = conn.execute(&sql, params_from_iter(bind_values))?;
    info!(
        "event=batch_year_update module=batch status=ok requested={} updated={changed}",
        request.ids.len()
    );

    Ok(changed)
}

/// Deletes every book whose author matches the given name exactly.
///
/// Returns the number of rows deleted; 0 when nothing matched.
pub fn delete_books_by_author(conn: &Connection, author: &str) -> BatchResult<usize> {
    if author.is_empty() {
        return Err(BatchError::EmptyAuthor);
    }

    let changed = conn.execute("DELETE FROM books WHERE author = ?1;", [author])?;
    info!("event=batch_delete_by_author module=batch status=ok deleted={changed}");

    Ok(changed)
}
