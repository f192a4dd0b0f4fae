//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record shared by every query and mutation
//!   path.
//! - Provide typed create/patch inputs so request data never reaches the
//!   repository as loose key/value pairs.
//!
//! # Invariants
//! - `id` is assigned by the repository on creation and never reused.
//! - `title` and `author` are never blank on a persisted record.
//! - `publish_date`, when present, is a `YYYY-MM-DD` string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a catalog record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

static PUBLISH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid publish date regex"));

/// Validation failure for book write inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// `title` is empty or whitespace-only.
    BlankTitle,
    /// `author` is empty or whitespace-only.
    BlankAuthor,
    /// `publish_date` is present but not shaped like `YYYY-MM-DD`.
    MalformedPublishDate(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankAuthor => write!(f, "author must not be blank"),
            Self::MalformedPublishDate(value) => {
                write!(f, "publish_date must be YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for BookValidationError {}

/// Canonical catalog record.
///
/// `genre` and `publish_date` stay optional: the catalog predates both
/// fields, and older rows carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned id, immutable for the record's lifetime.
    pub id: BookId,
    /// Required display title.
    pub title: String,
    /// Required author name, matched exactly by batch deletes.
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// Optional genre label, matched exactly by the genre filter.
    pub genre: Option<String>,
    /// Optional `YYYY-MM-DD` publication date.
    pub publish_date: Option<String>,
}

impl Book {
    /// Checks the record against the model invariants.
    ///
    /// Read paths call this on rows loaded from the store so invalid
    /// persisted state is reported instead of silently passed on.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.publish_date.as_deref())
    }
}

/// Typed input for creating a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

impl NewBook {
    /// Creates an input carrying only the required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: None,
            publish_date: None,
        }
    }

    /// Checks the input against the model invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.publish_date.as_deref())
    }
}

/// Typed partial update for a single record.
///
/// Every `None` keeps the stored value; there is no way to clear a field
/// through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub publish_date: Option<String>,
}

impl BookPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.publish_date.is_none()
    }

    /// Merges the patch over an existing record in place.
    ///
    /// The caller re-validates the merged record before persisting it.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(genre) = &self.genre {
            book.genre = Some(genre.clone());
        }
        if let Some(publish_date) = &self.publish_date {
            book.publish_date = Some(publish_date.clone());
        }
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    publish_date: Option<&str>,
) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::BlankTitle);
    }
    if author.trim().is_empty() {
        return Err(BookValidationError::BlankAuthor);
    }
    if let Some(date) = publish_date {
        if !PUBLISH_DATE_RE.is_match(date) {
            return Err(BookValidationError::MalformedPublishDate(date.to_string()));
        }
    }
    Ok(())
}
