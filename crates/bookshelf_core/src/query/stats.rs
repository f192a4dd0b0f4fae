//! Catalog-wide aggregate statistics.
//!
//! # Responsibility
//! - Compute the statistics snapshot and the genre counts, each from one
//!   `GROUP BY` pass.
//!
//! # Invariants
//! - The statistics enumeration runs in ascending year order, which is what
//!   pins the most-common-year tie-break.
//! - An empty catalog yields average 0, no most-common year and an empty
//!   per-year map.

use super::QueryResult;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate snapshot over the full catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Mean title length in characters, `0.0` for an empty catalog.
    pub average_title_length: f64,
    /// Year with the most books; ties resolve to the first year of the
    /// ascending enumeration. `None` for an empty catalog.
    pub most_common_year: Option<i32>,
    /// Book count per distinct year.
    pub books_per_year: BTreeMap<i32, u32>,
}

/// Computes the catalog statistics in a single grouped pass.
pub fn catalog_statistics(conn: &Connection) -> QueryResult<CatalogStats> {
    let mut stmt = conn.prepare(
        "SELECT
            year,
            COUNT(*) AS book_count,
            SUM(length(title)) AS title_length_sum
         FROM books
         GROUP BY year
         ORDER BY year ASC;",
    )?;
    let mut rows = stmt.query([])?;

    let mut books_per_year = BTreeMap::new();
    let mut total_books: i64 = 0;
    let mut total_title_length: i64 = 0;
    let mut most_common: Option<(i32, u32)> = None;

    while let Some(row) = rows.next()? {
        let year: i32 = row.get("year")?;
        let book_count: u32 = row.get("book_count")?;
        let title_length_sum: i64 = row.get("title_length_sum")?;

        books_per_year.insert(year, book_count);
        total_books += i64::from(book_count);
        total_title_length += title_length_sum;

        // Strict comparison keeps the earliest year of a tied count.
        let replace = match most_common {
            None => true,
            Some((_, best_count)) => book_count > best_count,
        };
        if replace {
            most_common = Some((year, book_count));
        }
    }

    let average_title_length = if total_books == 0 {
        0.0
    } else {
        total_title_length as f64 / total_books as f64
    };

    Ok(CatalogStats {
        average_title_length,
        most_common_year: most_common.map(|(year, _)| year),
        books_per_year,
    })
}

/// Counts books per distinct genre value.
///
/// Books without a genre carry no genre value and are not counted.
pub fn count_by_genre(conn: &Connection) -> QueryResult<BTreeMap<String, u32>> {
    let mut stmt = conn.prepare(
        "SELECT genre, COUNT(*) AS book_count
         FROM books
         WHERE genre IS NOT NULL
         GROUP BY genre
         ORDER BY genre ASC;",
    )?;
    let mut rows = stmt.query([])?;

    let mut counts = BTreeMap::new();
    while let Some(row) = rows.next()? {
        let genre: String = row.get("genre")?;
        let book_count: u32 = row.get("book_count")?;
        counts.insert(genre, book_count);
    }

    Ok(counts)
}
