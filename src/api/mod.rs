pub mod books;
pub mod error;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

/// Book routes mounted under `prefix`. Both `/Books` and `/books` are
/// served since clients rely on either spelling.
fn book_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(
            prefix,
            get(books::list_books)
                .post(books::create_book)
                .put(books::update_book),
        )
        .route(
            &format!("{}/:id", prefix),
            get(books::get_book_or_genre).delete(books::delete_book),
        )
        .route(
            &format!("{}/:id/details", prefix),
            get(books::get_book_detail),
        )
}

pub fn api_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .merge(book_routes("/Books"))
        .merge(book_routes("/books"))
        // Books by author (name substring or id)
        .route("/authors/:author/books", get(books::list_books_by_author))
        .with_state(state)
}
