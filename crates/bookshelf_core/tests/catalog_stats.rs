use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    catalog_statistics, count_by_genre, BookRepository, NewBook, SqliteBookRepository,
};
use rusqlite::Connection;
use std::collections::BTreeMap;

#[test]
fn empty_catalog_yields_zeroed_statistics() {
    let conn = open_db_in_memory().unwrap();

    let stats = catalog_statistics(&conn).unwrap();
    assert_eq!(stats.average_title_length, 0.0);
    assert_eq!(stats.most_common_year, None);
    assert!(stats.books_per_year.is_empty());
}

#[test]
fn average_title_length_spans_the_whole_catalog() {
    let conn = open_db_in_memory().unwrap();
    add_book(&conn, "Emma", "Jane Austen", 1815);
    add_book(&conn, "Hamlet", "William Shakespeare", 1603);

    // length("Emma") = 4, length("Hamlet") = 6.
    let stats = catalog_statistics(&conn).unwrap();
    assert_eq!(stats.average_title_length, 5.0);
}

#[test]
fn books_per_year_counts_every_group() {
    let conn = open_db_in_memory().unwrap();
    add_book(&conn, "Emma", "Jane Austen", 1815);
    add_book(&conn, "Persuasion", "Jane Austen", 1815);
    add_book(&conn, "Dune", "Frank Herbert", 1965);

    let stats = catalog_statistics(&conn).unwrap();
    let expected: BTreeMap<i32, u32> = [(1815, 2), (1965, 1)].into_iter().collect();
    assert_eq!(stats.books_per_year, expected);
    assert_eq!(stats.most_common_year, Some(1815));
}

#[test]
fn most_common_year_tie_prefers_the_smallest_year() {
    let conn = open_db_in_memory().unwrap();
    add_book(&conn, "Emma", "Jane Austen", 1815);
    add_book(&conn, "Persuasion", "Jane Austen", 1815);
    add_book(&conn, "Dune", "Frank Herbert", 1965);
    add_book(&conn, "Dune Messiah", "Frank Herbert", 1965);
    add_book(&conn, "Outlier", "Someone Else", 2000);

    let stats = catalog_statistics(&conn).unwrap();
    assert_eq!(stats.most_common_year, Some(1815));
}

#[test]
fn statistics_serialize_with_stable_field_names() {
    let conn = open_db_in_memory().unwrap();
    add_book(&conn, "Emma", "Jane Austen", 1815);

    let stats = catalog_statistics(&conn).unwrap();
    let value = serde_json::to_value(&stats).unwrap();

    assert_eq!(value["average_title_length"], 4.0);
    assert_eq!(value["most_common_year"], 1815);
    assert_eq!(value["books_per_year"]["1815"], 1);
}

#[test]
fn genre_counts_skip_rows_without_genre() {
    let conn = open_db_in_memory().unwrap();
    add_book_with_genre(&conn, "Dune", "Frank Herbert", 1965, Some("Science Fiction"));
    add_book_with_genre(
        &conn,
        "Left Hand of Darkness",
        "Ursula K. Le Guin",
        1969,
        Some("Science Fiction"),
    );
    add_book_with_genre(&conn, "Emma", "Jane Austen", 1815, Some("Romance"));
    add_book_with_genre(&conn, "Unlabeled", "Unknown", 1900, None);

    let counts = count_by_genre(&conn).unwrap();
    let expected: BTreeMap<String, u32> = [
        ("Romance".to_string(), 1),
        ("Science Fiction".to_string(), 2),
    ]
    .into_iter()
    .collect();
    assert_eq!(counts, expected);
}

#[test]
fn genre_counts_on_empty_catalog_are_empty() {
    let conn = open_db_in_memory().unwrap();
    assert!(count_by_genre(&conn).unwrap().is_empty());
}

fn add_book(conn: &Connection, title: &str, author: &str, year: i32) {
    add_book_with_genre(conn, title, author, year, None);
}

fn add_book_with_genre(
    conn: &Connection,
    title: &str,
    author: &str,
    year: i32,
    genre: Option<&str>,
) {
    let repo = SqliteBookRepository::try_new(conn).unwrap();
    let mut input = NewBook::new(title, author, year);
    input.genre = genre.map(str::to_string);
    repo.create_book(&input).unwrap();
}
