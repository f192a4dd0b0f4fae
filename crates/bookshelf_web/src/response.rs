//! Framework-neutral response envelopes.
//!
//! # Responsibility
//! - Carry status, body and redirect target from handlers back to whatever
//!   server hosts the adapter.
//! - Fix the JSON body shapes shared by every API endpoint.
//!
//! # Invariants
//! - JSON argument failures are status 400 with an `{"error": ...}` body.
//! - Book list payloads expose exactly `id`, `title`, `author`, `year`.

use bookshelf_core::Book;
use serde::Serialize;
use serde_json::{json, Value};

/// Response from a JSON endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonResponse {
    pub status: u16,
    pub body: Value,
}

impl JsonResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message }),
        }
    }

    /// Internal failures carry a fixed message; details stay in the log.
    pub fn internal_error() -> Self {
        Self {
            status: 500,
            body: json!({ "error": "internal error" }),
        }
    }
}

/// Response from an HTML endpoint.
///
/// `location` is only set on redirects; the body is empty in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlResponse {
    pub status: u16,
    pub body: String,
    pub location: Option<String>,
}

impl HtmlResponse {
    pub fn ok(body: String) -> Self {
        Self {
            status: 200,
            body,
            location: None,
        }
    }

    pub fn bad_request(body: String) -> Self {
        Self {
            status: 400,
            body,
            location: None,
        }
    }

    pub fn not_found(body: String) -> Self {
        Self {
            status: 404,
            body,
            location: None,
        }
    }

    pub fn redirect(location: String) -> Self {
        Self {
            status: 302,
            body: String::new(),
            location: Some(location),
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status: 500,
            body: "<p>internal error</p>".to_string(),
            location: None,
        }
    }
}

/// Wire shape of one book in API list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPayload {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl From<&Book> for BookPayload {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
        }
    }
}

/// Serializes books into the API list body.
pub fn book_list_body(books: &[Book]) -> Value {
    let payload: Vec<BookPayload> = books.iter().map(BookPayload::from).collect();
    json!(payload)
}

/// Builds the `{"message": ...}` body used by batch endpoints.
pub fn message_body(message: String) -> Value {
    json!({ "message": message })
}
