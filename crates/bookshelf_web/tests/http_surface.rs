use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{Book, BookRepository, NewBook, SqliteBookRepository};
use bookshelf_web::handlers::{
    add_book_form, add_book_submit, book_statistics, books_by_author_length, delete_book_submit,
    delete_books_by_author_endpoint, edit_book_form, edit_book_submit, filter_books_page,
    genre_counts_page, list_books_page, search_books, sort_books_page, update_books_year,
};
use bookshelf_web::{AddBookForm, EditBookForm};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn add_form_page_renders() {
    let response = add_book_form();
    assert_eq!(response.status, 200);
    assert!(response.body.contains("<form"));
}

#[test]
fn add_submit_creates_book_and_redirects_to_listing() {
    let conn = open_db_in_memory().unwrap();

    let form = AddBookForm {
        title: Some("Dune".to_string()),
        author: Some("Frank Herbert".to_string()),
        year: Some("1965".to_string()),
    };
    let response = add_book_submit(&conn, &form);

    assert_eq!(response.status, 302);
    assert_eq!(response.location.as_deref(), Some("/books/"));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let books = repo.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].year, 1965);
}

#[test]
fn add_submit_rejects_missing_or_malformed_year() {
    let conn = open_db_in_memory().unwrap();

    let missing = AddBookForm {
        title: Some("Dune".to_string()),
        author: Some("Frank Herbert".to_string()),
        year: None,
    };
    let response = add_book_submit(&conn, &missing);
    assert_eq!(response.status, 400);
    assert!(response.body.contains("year is required"));

    let malformed = AddBookForm {
        year: Some("nineteen".to_string()),
        ..missing
    };
    let response = add_book_submit(&conn, &malformed);
    assert_eq!(response.status, 400);
    assert!(response.body.contains("year must be a whole number"));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn add_submit_rejects_blank_title_and_keeps_input() {
    let conn = open_db_in_memory().unwrap();

    let form = AddBookForm {
        title: Some("   ".to_string()),
        author: Some("Frank Herbert".to_string()),
        year: Some("1965".to_string()),
    };
    let response = add_book_submit(&conn, &form);

    assert_eq!(response.status, 400);
    assert!(response.body.contains("title must not be blank"));
    assert!(response.body.contains("Frank Herbert"));
}

#[test]
fn listing_page_shows_every_book() {
    let conn = open_db_in_memory().unwrap();
    seed_book(&conn, "War and Peace", "Leo Tolstoy", 1869);
    seed_book(&conn, "Emma", "Jane Austen", 1815);

    let response = list_books_page(&conn);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("War and Peace"));
    assert!(response.body.contains("Emma"));
}

#[test]
fn filter_page_selects_genre_or_unset() {
    let conn = open_db_in_memory().unwrap();
    seed_book_with_genre(&conn, "Dune", "Frank Herbert", 1965, Some("Science Fiction"));
    seed_book_with_genre(&conn, "Emma", "Jane Austen", 1815, Some("Romance"));
    seed_book_with_genre(&conn, "Old Record", "Unknown", 1900, None);

    let response = filter_books_page(&conn, Some("Romance"));
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Emma"));
    assert!(!response.body.contains("Dune"));

    let response = filter_books_page(&conn, None);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Old Record"));
    assert!(!response.body.contains("Emma"));
}

#[test]
fn sort_page_renders_both_directions() {
    let conn = open_db_in_memory().unwrap();
    seed_book(&conn, "Zorba the Greek", "Nikos Kazantzakis", 1946);
    seed_book(&conn, "Atonement", "Ian McEwan", 2001);

    let ascending = sort_books_page(&conn, None);
    assert_eq!(ascending.status, 200);
    let first = ascending.body.find("Atonement").unwrap();
    let second = ascending.body.find("Zorba the Greek").unwrap();
    assert!(first < second);

    let descending = sort_books_page(&conn, Some("desc"));
    assert_eq!(descending.status, 200);
    let first = descending.body.find("Zorba the Greek").unwrap();
    let second = descending.body.find("Atonement").unwrap();
    assert!(first < second);
}

#[test]
fn edit_form_shows_book_or_404() {
    let conn = open_db_in_memory().unwrap();
    let book = seed_book(&conn, "Draft", "Author", 1990);

    let response = edit_book_form(&conn, book.id);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Draft"));

    let response = edit_book_form(&conn, 999);
    assert_eq!(response.status, 404);
}

#[test]
fn edit_submit_updates_fields_but_never_year() {
    let conn = open_db_in_memory().unwrap();
    let book = seed_book(&conn, "Draft", "Author", 1990);

    let form = EditBookForm {
        title: Some("Final".to_string()),
        genre: Some("History".to_string()),
        ..EditBookForm::default()
    };
    let response = edit_book_submit(&conn, book.id, &form);

    assert_eq!(response.status, 200);
    assert!(response.body.contains("Book updated successfully!"));
    assert!(response.body.contains("Final"));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    let stored = repo.get_book(book.id).unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.genre.as_deref(), Some("History"));
    assert_eq!(stored.author, "Author");
    assert_eq!(stored.year, 1990);
}

#[test]
fn edit_submit_rejects_invalid_input_and_keeps_record() {
    let conn = open_db_in_memory().unwrap();
    let book = seed_book(&conn, "Draft", "Author", 1990);

    let form = EditBookForm {
        title: Some("".to_string()),
        ..EditBookForm::default()
    };
    let response = edit_book_submit(&conn, book.id, &form);

    assert_eq!(response.status, 400);
    assert!(response.body.contains("title must not be blank"));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_book(book.id).unwrap().title, "Draft");
}

#[test]
fn edit_submit_for_missing_book_is_404() {
    let conn = open_db_in_memory().unwrap();

    let response = edit_book_submit(&conn, 42, &EditBookForm::default());
    assert_eq!(response.status, 404);
}

#[test]
fn delete_submit_confirms_then_404s_on_repeat() {
    let conn = open_db_in_memory().unwrap();
    let book = seed_book(&conn, "Ephemeral", "Author", 1999);

    let response = delete_book_submit(&conn, book.id);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Book deleted successfully!"));

    let response = delete_book_submit(&conn, book.id);
    assert_eq!(response.status, 404);
}

#[test]
fn genre_counts_page_lists_each_genre() {
    let conn = open_db_in_memory().unwrap();
    seed_book_with_genre(&conn, "Dune", "Frank Herbert", 1965, Some("Science Fiction"));
    seed_book_with_genre(&conn, "Foundation", "Isaac Asimov", 1951, Some("Science Fiction"));
    seed_book_with_genre(&conn, "Unlabeled", "Unknown", 1900, None);

    let response = genre_counts_page(&conn);
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Science Fiction"));
    assert!(response.body.contains("<td>2</td>"));
}

#[test]
fn search_endpoint_contract() {
    let conn = open_db_in_memory().unwrap();
    seed_book(&conn, "War and Peace", "Leo Tolstoy", 1869);

    let response = search_books(&conn, None);
    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "Phrase is required" }));

    let response = search_books(&conn, Some("   "));
    assert_eq!(response.status, 400);

    let response = search_books(&conn, Some("war"));
    assert_eq!(response.status, 200);
    let hits = response.body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    let hit = hits[0].as_object().unwrap();
    assert_eq!(hit.len(), 4);
    assert_eq!(hit["title"], "War and Peace");
    assert_eq!(hit["author"], "Leo Tolstoy");
    assert_eq!(hit["year"], 1869);
}

#[test]
fn author_length_endpoint_contract() {
    let conn = open_db_in_memory().unwrap();
    seed_book(&conn, "Short", "Sun Tzu", 1910);
    seed_book(&conn, "Long", "Leo Tolstoy", 1869);

    let response = books_by_author_length(&conn, None);
    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "min_length is required" }));

    let response = books_by_author_length(&conn, Some("many"));
    assert_eq!(response.status, 400);

    let response = books_by_author_length(&conn, Some("10"));
    assert_eq!(response.status, 200);
    let hits = response.body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["author"], "Leo Tolstoy");
}

#[test]
fn year_update_endpoint_contract() {
    let conn = open_db_in_memory().unwrap();
    let first = seed_book(&conn, "First", "Author A", 2000);
    let second = seed_book(&conn, "Second", "Author B", 2001);

    let response = update_books_year(&conn, "not json");
    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "invalid JSON body" }));

    let body = json!({ "ids": [first.id, second.id] }).to_string();
    let response = update_books_year(&conn, &body);
    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "year is required" }));

    let body = json!({ "ids": [], "year": 1999 }).to_string();
    let response = update_books_year(&conn, &body);
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "message": "0 books updated" }));

    let body = json!({ "ids": [first.id, second.id, 999], "year": 1999 }).to_string();
    let response = update_books_year(&conn, &body);
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "message": "2 books updated" }));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(repo.get_book(first.id).unwrap().year, 1999);
    assert_eq!(repo.get_book(second.id).unwrap().year, 1999);
}

#[test]
fn delete_by_author_endpoint_contract() {
    let conn = open_db_in_memory().unwrap();
    seed_book(&conn, "War and Peace", "Leo Tolstoy", 1869);
    seed_book(&conn, "Anna Karenina", "Leo Tolstoy", 1878);
    seed_book(&conn, "Emma", "Jane Austen", 1815);

    let response = delete_books_by_author_endpoint(&conn, None);
    assert_eq!(response.status, 400);
    assert_eq!(response.body, json!({ "error": "author is required" }));

    let response = delete_books_by_author_endpoint(&conn, Some("Leo Tolstoy"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "message": "2 books deleted" }));

    let response = delete_books_by_author_endpoint(&conn, Some("Leo Tolstoy"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!({ "message": "0 books deleted" }));

    let repo = SqliteBookRepository::try_new(&conn).unwrap();
    assert_eq!(repo.list_books().unwrap().len(), 1);
}

#[test]
fn stats_endpoint_contract() {
    let conn = open_db_in_memory().unwrap();

    let response = book_statistics(&conn);
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        json!({
            "average_title_length": 0.0,
            "most_common_year": null,
            "books_per_year": {}
        })
    );

    seed_book(&conn, "Emma", "Jane Austen", 1815);
    seed_book(&conn, "Persuasion", "Jane Austen", 1815);

    let response = book_statistics(&conn);
    assert_eq!(response.status, 200);
    assert_eq!(response.body["most_common_year"], 1815);
    assert_eq!(response.body["books_per_year"]["1815"], 2);
    assert_eq!(response.body["average_title_length"], 7.0);
}

fn seed_book(conn: &Connection, title: &str, author: &str, year: i32) -> Book {
    seed_book_with_genre(conn, title, author, year, None)
}

fn seed_book_with_genre(
    conn: &Connection,
    title: &str,
    author: &str,
    year: i32,
    genre: Option<&str>,
) -> Book {
    let repo = SqliteBookRepository::try_new(conn).unwrap();
    let mut input = NewBook::new(title, author, year);
    input.genre = genre.map(str::to_string);
    repo.create_book(&input).unwrap()
}
