//! HTML rendering over embedded handlebars templates.
//!
//! # Responsibility
//! - Hold the compiled template registry for the whole process.
//! - Map domain records into the flat view models the templates consume.
//!
//! # Invariants
//! - Strict mode is on: a template referencing an absent field fails the
//!   render instead of printing nothing.
//! - View models carry every field their template mentions, optional ones
//!   as `null`.

use bookshelf_core::Book;
use handlebars::Handlebars;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_LIST_TEMPLATE: &str = "book_list";
const ADD_BOOK_TEMPLATE: &str = "add_book";
const EDIT_BOOK_TEMPLATE: &str = "edit_book";
const FILTER_BOOKS_TEMPLATE: &str = "filter_books";
const SORT_BOOKS_TEMPLATE: &str = "sort_books";
const GENRE_COUNTS_TEMPLATE: &str = "genre_counts";

const TEMPLATES: &[(&str, &str)] = &[
    (BOOK_LIST_TEMPLATE, include_str!("../templates/book_list.hbs")),
    (ADD_BOOK_TEMPLATE, include_str!("../templates/add_book.hbs")),
    (EDIT_BOOK_TEMPLATE, include_str!("../templates/edit_book.hbs")),
    (
        FILTER_BOOKS_TEMPLATE,
        include_str!("../templates/filter_books.hbs"),
    ),
    (
        SORT_BOOKS_TEMPLATE,
        include_str!("../templates/sort_books.hbs"),
    ),
    (
        GENRE_COUNTS_TEMPLATE,
        include_str!("../templates/genre_counts.hbs"),
    ),
];

static VIEWS: OnceCell<Views> = OnceCell::new();

pub type ViewResult = Result<String, ViewError>;

/// Rendering failure, either at registration or render time.
#[derive(Debug)]
pub enum ViewError {
    Template(String),
    Render(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Template(message) => write!(f, "template registration failed: {message}"),
            Self::Render(message) => write!(f, "template render failed: {message}"),
        }
    }
}

impl Error for ViewError {}

impl From<handlebars::TemplateError> for ViewError {
    fn from(value: handlebars::TemplateError) -> Self {
        Self::Template(value.to_string())
    }
}

impl From<handlebars::RenderError> for ViewError {
    fn from(value: handlebars::RenderError) -> Self {
        Self::Render(value.to_string())
    }
}

/// One book as the HTML tables show it.
#[derive(Debug, Clone, Serialize)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Option<String>,
    pub publish_date: Option<String>,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year,
            genre: book.genre.clone(),
            publish_date: book.publish_date.clone(),
        }
    }
}

pub fn book_rows(books: &[Book]) -> Vec<BookRow> {
    books.iter().map(BookRow::from).collect()
}

/// Catalog listing, with an optional one-shot status message.
#[derive(Debug, Serialize)]
pub struct BookListView {
    pub books: Vec<BookRow>,
    pub message: Option<String>,
}

/// Add form, repopulated with the rejected input on failure.
#[derive(Debug, Default, Serialize)]
pub struct AddBookView {
    pub title: String,
    pub author: String,
    pub year: String,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EditBookView {
    pub book: BookRow,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FilterBooksView {
    pub books: Vec<BookRow>,
    pub filter_genre: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SortBooksView {
    pub books: Vec<BookRow>,
    pub order: String,
}

#[derive(Debug, Serialize)]
pub struct GenreCountRow {
    pub genre: String,
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct GenreCountsView {
    pub counts: Vec<GenreCountRow>,
}

pub fn render_book_list(view: &BookListView) -> ViewResult {
    render(BOOK_LIST_TEMPLATE, view)
}

pub fn render_add_form(view: &AddBookView) -> ViewResult {
    render(ADD_BOOK_TEMPLATE, view)
}

pub fn render_edit_form(view: &EditBookView) -> ViewResult {
    render(EDIT_BOOK_TEMPLATE, view)
}

pub fn render_filter_page(view: &FilterBooksView) -> ViewResult {
    render(FILTER_BOOKS_TEMPLATE, view)
}

pub fn render_sort_page(view: &SortBooksView) -> ViewResult {
    render(SORT_BOOKS_TEMPLATE, view)
}

pub fn render_genre_counts(view: &GenreCountsView) -> ViewResult {
    render(GENRE_COUNTS_TEMPLATE, view)
}

fn render<T: Serialize>(template: &str, data: &T) -> ViewResult {
    let views = VIEWS.get_or_try_init(Views::build)?;
    Ok(views.registry.render(template, data)?)
}

struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    fn build() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }
}
