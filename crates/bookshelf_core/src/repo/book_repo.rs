//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `books` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate inputs before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every mutation is a single autocommitted statement, durable before the
//!   call returns.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    year,
    genre,
    publish_date
FROM books";

const REQUIRED_COLUMNS: &[&str] = &["id", "title", "author", "year", "genre", "publish_date"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for book persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
    /// Connection schema version does not match this binary's migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db first"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column: {table}.{column}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Persists a new record and returns it with the assigned id.
    fn create_book(&self, input: &NewBook) -> RepoResult<Book>;
    /// Loads one record by id.
    fn get_book(&self, id: BookId) -> RepoResult<Book>;
    /// Loads the full catalog ordered by id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Merges a patch over the stored record and persists the result.
    fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book>;
    /// Deletes one record. Returns whether a row existed.
    fn delete_book(&self, id: BookId) -> RepoResult<bool>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// Refuses connections whose schema version or table shape does not
    /// match this binary, so callers cannot silently operate on an
    /// unmigrated database.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, input: &NewBook) -> RepoResult<Book> {
        input.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, year, genre, publish_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                input.title.as_str(),
                input.author.as_str(),
                input.year,
                input.genre.as_deref(),
                input.publish_date.as_deref(),
            ],
        )?;

        // Read-back keeps the returned record honest about what the store
        // actually holds.
        self.get_book(self.conn.last_insert_rowid())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Book> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return parse_book_row(row);
        }

        Err(RepoError::NotFound(id))
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let mut book = self.get_book(id)?;
        patch.apply_to(&mut book);
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2,
                year = ?3,
                genre = ?4,
                publish_date = ?5
             WHERE id = ?6;",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.year,
                book.genre.as_deref(),
                book.publish_date.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(book)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM books WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let book = Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        genre: row.get("genre")?,
        publish_date: row.get("publish_date")?,
    };
    book.validate()?;
    Ok(book)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "books")? {
        return Err(RepoError::MissingRequiredTable("books"));
    }

    for &column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "books", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "books",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
