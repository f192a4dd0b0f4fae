//! Route table for the catalog HTTP surface.
//!
//! # Responsibility
//! - Declare every endpoint path, method set and handler binding in one
//!   place, so hosts can mount the adapter without guessing the layout.
//!
//! # Invariants
//! - Paths are relative to [`MOUNT_PREFIX`].
//! - One table row per handler in [`crate::handlers`].

/// Prefix the whole surface mounts under.
pub const MOUNT_PREFIX: &str = "/books";

pub const ADD_BOOK_PATH: &str = "/add";
pub const LIST_BOOKS_PATH: &str = "/";
pub const FILTER_BOOKS_PATH: &str = "/books/filter";
pub const SORT_BOOKS_PATH: &str = "/books/sort";
pub const EDIT_BOOK_PATH: &str = "/books/edit/{id}";
pub const DELETE_BOOK_PATH: &str = "/books/delete/{id}";
pub const GENRE_COUNTS_PATH: &str = "/books/count-by-genre";
pub const SEARCH_PATH: &str = "/search";
pub const AUTHOR_LENGTH_PATH: &str = "/length";
pub const YEAR_UPDATE_PATH: &str = "/update";
pub const DELETE_BY_AUTHOR_PATH: &str = "/delete_by_author";
pub const STATS_PATH: &str = "/stats";

/// HTTP methods used by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Handler identity for a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AddBook,
    ListBooks,
    FilterBooks,
    SortBooks,
    EditBook,
    DeleteBook,
    GenreCounts,
    SearchBooks,
    BooksByAuthorLength,
    UpdateBooksYear,
    DeleteBooksByAuthor,
    BookStatistics,
}

/// One mountable endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub methods: &'static [Method],
    pub path: &'static str,
    pub endpoint: Endpoint,
}

/// Full endpoint table, in presentation order.
pub const ROUTES: &[Route] = &[
    Route {
        methods: &[Method::Get, Method::Post],
        path: ADD_BOOK_PATH,
        endpoint: Endpoint::AddBook,
    },
    Route {
        methods: &[Method::Get],
        path: LIST_BOOKS_PATH,
        endpoint: Endpoint::ListBooks,
    },
    Route {
        methods: &[Method::Get],
        path: FILTER_BOOKS_PATH,
        endpoint: Endpoint::FilterBooks,
    },
    Route {
        methods: &[Method::Get],
        path: SORT_BOOKS_PATH,
        endpoint: Endpoint::SortBooks,
    },
    Route {
        methods: &[Method::Get, Method::Post],
        path: EDIT_BOOK_PATH,
        endpoint: Endpoint::EditBook,
    },
    Route {
        methods: &[Method::Post],
        path: DELETE_BOOK_PATH,
        endpoint: Endpoint::DeleteBook,
    },
    Route {
        methods: &[Method::Get],
        path: GENRE_COUNTS_PATH,
        endpoint: Endpoint::GenreCounts,
    },
    Route {
        methods: &[Method::Get],
        path: SEARCH_PATH,
        endpoint: Endpoint::SearchBooks,
    },
    Route {
        methods: &[Method::Get],
        path: AUTHOR_LENGTH_PATH,
        endpoint: Endpoint::BooksByAuthorLength,
    },
    Route {
        methods: &[Method::Put, Method::Patch],
        path: YEAR_UPDATE_PATH,
        endpoint: Endpoint::UpdateBooksYear,
    },
    Route {
        methods: &[Method::Delete],
        path: DELETE_BY_AUTHOR_PATH,
        endpoint: Endpoint::DeleteBooksByAuthor,
    },
    Route {
        methods: &[Method::Get],
        path: STATS_PATH,
        endpoint: Endpoint::BookStatistics,
    },
];

/// Returns the host-visible path for a relative route path.
pub fn absolute_path(path: &str) -> String {
    format!("{MOUNT_PREFIX}{path}")
}
