//! Request handlers for every catalog endpoint.
//!
//! # Responsibility
//! - Parse raw request input into typed core calls.
//! - Map core results onto status codes, JSON envelopes and rendered pages.
//!
//! # Invariants
//! - Handlers never panic; every failure becomes a response.
//! - Missing or invalid arguments answer 400, missing records 404, store
//!   failures 500.
//! - The store connection is taken per call, never held in module state.

use crate::response::{book_list_body, message_body, HtmlResponse, JsonResponse};
use crate::routes::{absolute_path, LIST_BOOKS_PATH};
use crate::views::{
    self, book_rows, AddBookView, BookListView, BookRow, EditBookView, FilterBooksView,
    GenreCountRow, GenreCountsView, SortBooksView,
};
use bookshelf_core::{
    catalog_statistics, count_by_genre, delete_books_by_author, filter_by_author_length,
    filter_by_genre, search_by_phrase, sort_by_title, update_year_for_ids, BatchError, BookId,
    BookPatch, BookService, NewBook, QueryError, RepoError, SortOrder, SqliteBookRepository,
    YearUpdateRequest,
};
use log::error;
use rusqlite::Connection;
use serde::Deserialize;
use std::fmt::Display;

const BOOK_UPDATED_MESSAGE: &str = "Book updated successfully!";
const BOOK_DELETED_MESSAGE: &str = "Book deleted successfully!";

/// Form fields accepted by the add endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddBookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
}

/// Form fields accepted by the edit endpoint.
///
/// `year` is deliberately absent: single-record edits never change it, the
/// batch year endpoint does.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditBookForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publish_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YearUpdateBody {
    #[serde(default)]
    ids: Vec<BookId>,
    year: Option<i32>,
}

/// GET /add
pub fn add_book_form() -> HtmlResponse {
    finish_html("add_book_form", 200, views::render_add_form(&AddBookView::default()))
}

/// POST /add
///
/// On success answers a redirect to the listing page. Rejected input
/// re-renders the form with the field values kept.
pub fn add_book_submit(conn: &Connection, form: &AddBookForm) -> HtmlResponse {
    let year_raw = form.year.as_deref().map(str::trim).unwrap_or("");
    if year_raw.is_empty() {
        return add_form_rejected(form, "year is required");
    }
    let year = match year_raw.parse::<i32>() {
        Ok(year) => year,
        Err(_) => return add_form_rejected(form, "year must be a whole number"),
    };

    let input = NewBook::new(
        form.title.clone().unwrap_or_default(),
        form.author.clone().unwrap_or_default(),
        year,
    );

    let service = match open_service(conn, "add_book_submit") {
        Ok(service) => service,
        Err(response) => return response,
    };
    match service.create_book(&input) {
        Ok(_) => HtmlResponse::redirect(absolute_path(LIST_BOOKS_PATH)),
        Err(RepoError::Validation(err)) => add_form_rejected(form, &err.to_string()),
        Err(err) => html_failure("add_book_submit", &err),
    }
}

/// GET /
pub fn list_books_page(conn: &Connection) -> HtmlResponse {
    list_page_with_message(conn, None)
}

/// GET /books/filter?genre=
///
/// An absent `genre` parameter selects books that have no genre set.
pub fn filter_books_page(conn: &Connection, genre: Option<&str>) -> HtmlResponse {
    match filter_by_genre(conn, genre) {
        Ok(books) => finish_html(
            "filter_books_page",
            200,
            views::render_filter_page(&FilterBooksView {
                books: book_rows(&books),
                filter_genre: genre.map(str::to_string),
            }),
        ),
        Err(err) => html_failure("filter_books_page", &err),
    }
}

/// GET /books/sort?order=
pub fn sort_books_page(conn: &Connection, order: Option<&str>) -> HtmlResponse {
    let sort_order = SortOrder::from_param(order);
    match sort_by_title(conn, sort_order) {
        Ok(books) => {
            let order_label = match sort_order {
                SortOrder::Ascending => "asc",
                SortOrder::Descending => "desc",
            };
            finish_html(
                "sort_books_page",
                200,
                views::render_sort_page(&SortBooksView {
                    books: book_rows(&books),
                    order: order_label.to_string(),
                }),
            )
        }
        Err(err) => html_failure("sort_books_page", &err),
    }
}

/// GET /books/edit/{id}
pub fn edit_book_form(conn: &Connection, id: BookId) -> HtmlResponse {
    let service = match open_service(conn, "edit_book_form") {
        Ok(service) => service,
        Err(response) => return response,
    };
    match service.get_book(id) {
        Ok(book) => finish_html(
            "edit_book_form",
            200,
            views::render_edit_form(&EditBookView {
                book: BookRow::from(&book),
                error: None,
            }),
        ),
        Err(RepoError::NotFound(_)) => book_not_found(id),
        Err(err) => html_failure("edit_book_form", &err),
    }
}

/// POST /books/edit/{id}
///
/// Absent form fields keep the stored values. On success renders the
/// listing page with a confirmation message, matching the add flow's
/// destination without the redirect.
pub fn edit_book_submit(conn: &Connection, id: BookId, form: &EditBookForm) -> HtmlResponse {
    let service = match open_service(conn, "edit_book_submit") {
        Ok(service) => service,
        Err(response) => return response,
    };

    let patch = BookPatch {
        title: form.title.clone(),
        author: form.author.clone(),
        year: None,
        genre: form.genre.clone(),
        publish_date: form.publish_date.clone(),
    };

    match service.edit_book(id, &patch) {
        Ok(_) => list_page_with_message(conn, Some(BOOK_UPDATED_MESSAGE.to_string())),
        Err(RepoError::NotFound(_)) => book_not_found(id),
        Err(RepoError::Validation(err)) => match service.get_book(id) {
            Ok(book) => finish_html(
                "edit_book_submit",
                400,
                views::render_edit_form(&EditBookView {
                    book: BookRow::from(&book),
                    error: Some(err.to_string()),
                }),
            ),
            Err(load_err) => html_failure("edit_book_submit", &load_err),
        },
        Err(err) => html_failure("edit_book_submit", &err),
    }
}

/// POST /books/delete/{id}
pub fn delete_book_submit(conn: &Connection, id: BookId) -> HtmlResponse {
    let service = match open_service(conn, "delete_book_submit") {
        Ok(service) => service,
        Err(response) => return response,
    };
    match service.delete_book(id) {
        Ok(true) => list_page_with_message(conn, Some(BOOK_DELETED_MESSAGE.to_string())),
        Ok(false) => book_not_found(id),
        Err(err) => html_failure("delete_book_submit", &err),
    }
}

/// GET /books/count-by-genre
pub fn genre_counts_page(conn: &Connection) -> HtmlResponse {
    match count_by_genre(conn) {
        Ok(counts) => {
            let rows = counts
                .into_iter()
                .map(|(genre, count)| GenreCountRow { genre, count })
                .collect();
            finish_html(
                "genre_counts_page",
                200,
                views::render_genre_counts(&GenreCountsView { counts: rows }),
            )
        }
        Err(err) => html_failure("genre_counts_page", &err),
    }
}

/// GET /search?phrase=
pub fn search_books(conn: &Connection, phrase: Option<&str>) -> JsonResponse {
    match search_by_phrase(conn, phrase.unwrap_or("")) {
        Ok(books) => JsonResponse::ok(book_list_body(&books)),
        Err(QueryError::EmptyPhrase) => JsonResponse::bad_request("Phrase is required"),
        Err(err) => json_failure("search_books", &err),
    }
}

/// GET /length?min_length=
///
/// A parameter that does not parse as a non-negative integer counts as
/// missing.
pub fn books_by_author_length(conn: &Connection, min_length: Option<&str>) -> JsonResponse {
    let min_length = match min_length.and_then(|raw| raw.trim().parse::<u32>().ok()) {
        Some(value) => value,
        None => return JsonResponse::bad_request("min_length is required"),
    };

    match filter_by_author_length(conn, min_length) {
        Ok(books) => JsonResponse::ok(book_list_body(&books)),
        Err(err) => json_failure("books_by_author_length", &err),
    }
}

/// PUT/PATCH /update with body `{"ids": [...], "year": ...}`
///
/// An empty or absent id set is a no-op answering `0 books updated`.
pub fn update_books_year(conn: &Connection, body: &str) -> JsonResponse {
    let parsed: YearUpdateBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => return JsonResponse::bad_request("invalid JSON body"),
    };
    let year = match parsed.year {
        Some(year) => year,
        None => return JsonResponse::bad_request("year is required"),
    };

    let request = YearUpdateRequest {
        ids: parsed.ids,
        year,
    };
    match update_year_for_ids(conn, &request) {
        Ok(updated) => JsonResponse::ok(message_body(format!("{updated} books updated"))),
        Err(err) => json_failure("update_books_year", &err),
    }
}

/// DELETE /delete_by_author?author=
pub fn delete_books_by_author_endpoint(conn: &Connection, author: Option<&str>) -> JsonResponse {
    match delete_books_by_author(conn, author.unwrap_or("")) {
        Ok(deleted) => JsonResponse::ok(message_body(format!("{deleted} books deleted"))),
        Err(BatchError::EmptyAuthor) => JsonResponse::bad_request("author is required"),
        Err(err) => json_failure("delete_books_by_author", &err),
    }
}

/// GET /stats
pub fn book_statistics(conn: &Connection) -> JsonResponse {
    let stats = match catalog_statistics(conn) {
        Ok(stats) => stats,
        Err(err) => return json_failure("book_statistics", &err),
    };
    match serde_json::to_value(&stats) {
        Ok(body) => JsonResponse::ok(body),
        Err(err) => json_failure("book_statistics", &err),
    }
}

fn list_page_with_message(conn: &Connection, message: Option<String>) -> HtmlResponse {
    let service = match open_service(conn, "list_books_page") {
        Ok(service) => service,
        Err(response) => return response,
    };
    match service.list_books() {
        Ok(books) => finish_html(
            "list_books_page",
            200,
            views::render_book_list(&BookListView {
                books: book_rows(&books),
                message,
            }),
        ),
        Err(err) => html_failure("list_books_page", &err),
    }
}

fn add_form_rejected(form: &AddBookForm, message: &str) -> HtmlResponse {
    let view = AddBookView {
        title: form.title.clone().unwrap_or_default(),
        author: form.author.clone().unwrap_or_default(),
        year: form.year.clone().unwrap_or_default(),
        error: Some(message.to_string()),
    };
    finish_html("add_book_submit", 400, views::render_add_form(&view))
}

fn book_not_found(id: BookId) -> HtmlResponse {
    HtmlResponse::not_found(format!("<p>Book {id} not found</p>"))
}

fn open_service<'conn>(
    conn: &'conn Connection,
    handler: &'static str,
) -> Result<BookService<SqliteBookRepository<'conn>>, HtmlResponse> {
    match SqliteBookRepository::try_new(conn) {
        Ok(repo) => Ok(BookService::new(repo)),
        Err(err) => {
            log_handler_failure(handler, &err);
            Err(HtmlResponse::internal_error())
        }
    }
}

fn finish_html(handler: &'static str, status: u16, rendered: views::ViewResult) -> HtmlResponse {
    match rendered {
        Ok(body) => HtmlResponse {
            status,
            body,
            location: None,
        },
        Err(err) => html_failure(handler, &err),
    }
}

fn html_failure(handler: &'static str, err: &dyn Display) -> HtmlResponse {
    log_handler_failure(handler, err);
    HtmlResponse::internal_error()
}

fn json_failure(handler: &'static str, err: &dyn Display) -> JsonResponse {
    log_handler_failure(handler, err);
    JsonResponse::internal_error()
}

fn log_handler_failure(handler: &'static str, err: &dyn Display) {
    error!("event=handler_failure module=web handler={handler} status=error error={err}");
}
