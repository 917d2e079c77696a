//! In-process book store.
//!
//! Held behind `web::Data` and shared across workers. Reads and writes go
//! through an `RwLock`; a poisoned lock degrades to an internal error
//! rather than panicking the worker.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use super::book::{Book, BookDraft};
use super::error::DomainError;

const RESOURCE: &str = "book";

/// Shared catalogue state.
#[derive(Debug, Default)]
pub struct Catalogue {
    next_id: AtomicU64,
    books: RwLock<HashMap<u64, Book>>,
}

impl Catalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch one book by id.
    pub fn find_by_id(&self, id: u64) -> Result<Book, DomainError> {
        let books = self.read()?;
        books
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(RESOURCE, id.to_string()))
    }

    /// List every book, ordered by id.
    pub fn list(&self) -> Result<Vec<Book>, DomainError> {
        let books = self.read()?;
        let mut all: Vec<Book> = books.values().cloned().collect();
        all.sort_by_key(|book| book.id);
        Ok(all)
    }

    /// Validate and store a new book, assigning the next id.
    pub fn add(&self, draft: BookDraft) -> Result<Book, DomainError> {
        draft.validate().map_err(DomainError::validation)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let book = draft.into_book(id);
        let mut books = self.write()?;
        books.insert(id, book.clone());
        Ok(book)
    }

    /// Validate and replace the book stored under `id`.
    pub fn update(&self, id: u64, draft: BookDraft) -> Result<Book, DomainError> {
        draft.validate().map_err(DomainError::validation)?;
        let mut books = self.write()?;
        if !books.contains_key(&id) {
            return Err(DomainError::not_found(RESOURCE, id.to_string()));
        }
        let book = draft.into_book(id);
        books.insert(id, book.clone());
        Ok(book)
    }

    /// Remove the book stored under `id`.
    pub fn delete(&self, id: u64) -> Result<(), DomainError> {
        let mut books = self.write()?;
        books
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(RESOURCE, id.to_string()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<u64, Book>>, DomainError> {
        self.books
            .read()
            .map_err(|_| DomainError::internal("catalogue lock poisoned"))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<u64, Book>>, DomainError> {
        self.books
            .write()
            .map_err(|_| DomainError::internal("catalogue lock poisoned"))
    }
}
