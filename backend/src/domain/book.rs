//! Book entity and draft validation.
//!
//! `Book` is the stored entity; `BookDraft` is the inbound payload used for
//! create and update. Validation collects every failed field into a
//! [`FieldErrors`] map so clients see all problems at once.

use serde::{Deserialize, Serialize};

use super::error::FieldErrors;

/// Earliest publication year accepted by the catalogue (movable type).
pub const EARLIEST_PUBLICATION_YEAR: i32 = 1450;
/// Latest publication year accepted by the catalogue.
pub const LATEST_PUBLICATION_YEAR: i32 = 2100;

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub published_year: i32,
}

/// Inbound payload for creating or replacing a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
    pub published_year: i32,
}

impl BookDraft {
    /// Check every field, returning the full map of failures.
    ///
    /// An empty `Ok(())` means the draft can become a [`Book`].
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut fields = FieldErrors::new();
        if self.title.trim().is_empty() {
            fields.insert("title".to_owned(), "must not be blank".to_owned());
        }
        if self.author.trim().is_empty() {
            fields.insert("author".to_owned(), "must not be blank".to_owned());
        }
        if !(EARLIEST_PUBLICATION_YEAR..=LATEST_PUBLICATION_YEAR).contains(&self.published_year) {
            fields.insert(
                "publishedYear".to_owned(),
                format!(
                    "must be between {EARLIEST_PUBLICATION_YEAR} and {LATEST_PUBLICATION_YEAR}"
                ),
            );
        }
        if fields.is_empty() { Ok(()) } else { Err(fields) }
    }

    /// Materialise the draft as a stored entity under `id`.
    pub fn into_book(self, id: u64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            description: self.description,
            published_year: self.published_year,
        }
    }
}
