//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::{BookDetail, BookSummary, DomainError};
use crate::models::book::Book;

/// Filter criteria for book listings. Empty criteria match every book.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BookFilter {
    /// Substring of the genre
    pub genre: Option<String>,
    /// Substring of the author's name
    pub author: Option<String>,
    pub author_id: Option<i32>,
}

impl BookFilter {
    pub fn genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            ..Default::default()
        }
    }

    pub fn author(name: impl Into<String>) -> Self {
        Self {
            author: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn author_id(id: i32) -> Self {
        Self {
            author_id: Some(id),
            ..Default::default()
        }
    }
}

/// Repository trait for Book entity
///
/// Listings are ordered by book id. Each mutation runs as its own unit of
/// work: it either commits entirely or leaves the store untouched.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find the summaries of all books matching the filter
    async fn find_summaries(&self, filter: BookFilter) -> Result<Vec<BookSummary>, DomainError>;

    /// Find the summary of a single book
    async fn find_summary(&self, id: i32) -> Result<Option<BookSummary>, DomainError>;

    /// Find the detail view of a single book
    async fn find_detail(&self, id: i32) -> Result<Option<BookDetail>, DomainError>;

    /// Insert a new book. The store assigns the id.
    async fn create(&self, book: Book) -> Result<Book, DomainError>;

    /// Overwrite every column of the book identified by `book.book_id`
    async fn update(&self, book: Book) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
