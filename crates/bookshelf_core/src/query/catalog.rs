//! Filter, sort and phrase-search queries over the catalog.
//!
//! # Responsibility
//! - Shape the list-returning read paths behind typed parameters.
//! - Escape user text before it meets SQL pattern syntax.
//!
//! # Invariants
//! - Phrase matching is substring, case-insensitive per SQLite `LIKE`
//!   semantics (ASCII case folding).
//! - Genre matching is exact, no case folding; `None` selects rows with no
//!   genre set.

use super::{QueryError, QueryResult};
use crate::model::book::Book;
use rusqlite::{Connection, Row};

const CATALOG_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year,
    genre,
    publish_date
FROM books";

/// Title ordering direction for [`sort_by_title`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Maps the wire `order` parameter; anything but `desc` sorts ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("desc") => Self::Descending,
            _ => Self::Ascending,
        }
    }

    fn sql_keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Returns all books whose title contains the phrase, case-insensitively.
///
/// The phrase is trimmed first; a blank phrase is rejected. `%` and `_`
/// inside the phrase match themselves, not as wildcards.
pub fn search_by_phrase(conn: &Connection, phrase: &str) -> QueryResult<Vec<Book>> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return Err(QueryError::EmptyPhrase);
    }

    let pattern = format!("%{}%", escape_like_pattern(trimmed));
    let mut stmt = conn.prepare(&format!(
        "{CATALOG_SELECT_SQL} WHERE title LIKE ?1 ESCAPE '\\' ORDER BY id ASC;"
    ))?;

    let books = collect_books(stmt.query([pattern.as_str()])?);
    books
}

/// Returns all books whose author name is at least `min_length` characters.
pub fn filter_by_author_length(conn: &Connection, min_length: u32) -> QueryResult<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "{CATALOG_SELECT_SQL} WHERE length(author) >= ?1 ORDER BY id ASC;"
    ))?;

    let books = collect_books(stmt.query([i64::from(min_length)])?);
    books
}

/// Returns the full catalog ordered by title in the requested direction.
///
/// Id breaks ties between equal titles so the ordering stays stable.
pub fn sort_by_title(conn: &Connection, order: SortOrder) -> QueryResult<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "{CATALOG_SELECT_SQL} ORDER BY title {}, id ASC;",
        order.sql_keyword()
    ))?;

    let books = collect_books(stmt.query([])?);
    books
}

/// Returns all books with exactly the given genre.
///
/// `None` selects books that have no genre set at all.
pub fn filter_by_genre(conn: &Connection, genre: Option<&str>) -> QueryResult<Vec<Book>> {
    match genre {
        Some(value) => {
            let mut stmt = conn.prepare(&format!(
                "{CATALOG_SELECT_SQL} WHERE genre = ?1 ORDER BY id ASC;"
            ))?;
            let books = collect_books(stmt.query([value])?);
            books
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "{CATALOG_SELECT_SQL} WHERE genre IS NULL ORDER BY id ASC;"
            ))?;
            let books = collect_books(stmt.query([])?);
            books
        }
    }
}

fn collect_books(mut rows: rusqlite::Rows<'_>) -> QueryResult<Vec<Book>> {
    let mut books = Vec::new();
    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }
    Ok(books)
}

fn parse_book_row(row: &Row<'_>) -> QueryResult<Book> {
    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        genre: row.get("genre")?,
        publish_date: row.get("publish_date")?,
    };

    if let Err(err) = book.validate() {
        return Err(QueryError::InvalidData(format!("book {}: {err}", book.id)));
    }

    Ok(book)
}

fn escape_like_pattern(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
