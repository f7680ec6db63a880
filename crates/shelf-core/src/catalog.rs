//! Book collection.
//!
//! The catalog checks key uniqueness and availability bounds only. ISBN
//! format is checked by callers with [`validate_isbn`] before `add`.

use crate::error::{Result, ShelfError};
use crate::storage::{Book, EntityKind, RecordStore};

/// Check that `isbn` is all ASCII digits and 10 or 13 characters long.
pub fn validate_isbn(isbn: &str) -> Result<()> {
    let digits_only = !isbn.is_empty() && isbn.chars().all(|c| c.is_ascii_digit());
    if !digits_only || !(isbn.len() == 10 || isbn.len() == 13) {
        return Err(ShelfError::Validation(format!(
            "Invalid ISBN {:?} (expected 10 or 13 digits)",
            isbn
        )));
    }
    Ok(())
}

/// In-memory book collection in store order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn load(store: &impl RecordStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    pub fn save(&self, store: &impl RecordStore) -> Result<()> {
        store.save(&self.books)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    pub fn exists(&self, isbn: &str) -> bool {
        self.find_by_isbn(isbn).is_some()
    }

    /// Append `book`, rejecting an ISBN that is already catalogued.
    pub fn add(&mut self, book: Book) -> Result<()> {
        if self.exists(&book.isbn) {
            return Err(ShelfError::DuplicateKey {
                entity: EntityKind::Book,
                key: book.isbn,
            });
        }
        self.books.push(book);
        Ok(())
    }

    /// Shift `copies_available` by `delta`, keeping it within
    /// `[0, copies_total]`. The book is untouched on error.
    pub fn adjust_availability(&mut self, isbn: &str, delta: i64) -> Result<&Book> {
        let book = self
            .books
            .iter_mut()
            .find(|book| book.isbn == isbn)
            .ok_or_else(|| ShelfError::BookNotFound(isbn.to_string()))?;

        let next = i64::from(book.copies_available) + delta;
        if next < 0 || next > i64::from(book.copies_total) {
            return Err(ShelfError::InvariantViolation(format!(
                "Availability for {} would be {} (total {})",
                isbn, next, book.copies_total
            )));
        }
        // Bounded by copies_total above, so the cast cannot truncate.
        book.copies_available = next as u32;
        Ok(book)
    }

    /// Books whose title or author contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> Vec<&Book> {
        let needle = keyword.trim().to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&needle)
                    || book.author.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
