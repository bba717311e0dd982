//! Read-only shapes returned by the book endpoints.
//!
//! Projections are built per request from a stored book and the name of its
//! author. They are never written back.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Book;

/// Compact listing entry
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
}

/// Full view of a single book
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct BookDetail {
    pub title: String,
    pub genre: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub publish_date: Option<chrono::NaiveDate>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub author: String,
}

impl BookSummary {
    pub fn project(book: Book, author: String) -> Self {
        Self {
            title: book.title,
            author,
            genre: book.genre,
        }
    }
}

impl BookDetail {
    pub fn project(book: Book, author: String) -> Self {
        Self {
            title: book.title,
            genre: book.genre,
            publish_date: book.publish_date,
            price: book.price,
            description: book.description,
            author,
        }
    }
}
