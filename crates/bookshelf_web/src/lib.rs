//! HTML and JSON presentation adapter for the Bookshelf catalog.
//!
//! The adapter is host-neutral: handlers take a store connection plus raw
//! request input and return response envelopes, so any HTTP server can
//! mount the route table without the core knowing about it.

pub mod config;
pub mod handlers;
pub mod response;
pub mod routes;
pub(crate) mod views;

pub use config::default_db_path;
pub use handlers::{AddBookForm, EditBookForm};
pub use response::{book_list_body, message_body, BookPayload, HtmlResponse, JsonResponse};
pub use routes::{absolute_path, Endpoint, Method, Route, MOUNT_PREFIX, ROUTES};
