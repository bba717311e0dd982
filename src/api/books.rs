use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::error::ApiError;
use crate::domain::{BookDetail, BookFilter, BookSummary, DomainError};
use crate::infrastructure::AppState;
use crate::models::Book;

/// Relative reference returned by create and update
fn book_location(id: i32) -> String {
    format!("api/Books/{}", id)
}

#[utoipa::path(
    get,
    path = "/api/Books",
    responses(
        (status = 200, description = "All books ordered by id", body = [BookSummary])
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let books = state.book_repo.find_summaries(BookFilter::default()).await?;
    Ok(Json(books))
}

/// `GET /Books/:id` serves two lookups. A segment that parses as an integer
/// is a book id, anything else is a genre substring.
#[utoipa::path(
    get,
    path = "/api/Books/{id}",
    params(
        ("id" = String, Path, description = "Book id, or a genre substring when not an integer")
    ),
    responses(
        (status = 200, description = "One book for an id, or every book in the genre", body = BookSummary),
        (status = 404, description = "No book with this id")
    )
)]
pub async fn get_book_or_genre(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, ApiError> {
    match segment.parse::<i32>() {
        Ok(id) => {
            let book = state
                .book_repo
                .find_summary(id)
                .await?
                .ok_or(DomainError::NotFound)?;
            Ok(Json(book).into_response())
        }
        Err(_) => {
            let books = state
                .book_repo
                .find_summaries(BookFilter::genre(segment))
                .await?;
            Ok(Json(books).into_response())
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/Books/{id}/details",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 404, description = "No book with this id")
    )
)]
pub async fn get_book_detail(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<BookDetail>, ApiError> {
    // A segment that is not an id names no book
    let id = segment.parse::<i32>().map_err(|_| DomainError::NotFound)?;
    let book = state
        .book_repo
        .find_detail(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(book))
}

/// Books by author: an integer segment is an author id, anything else a
/// substring of the author's name.
#[utoipa::path(
    get,
    path = "/api/authors/{author}/books",
    params(
        ("author" = String, Path, description = "Author id, or an author name substring")
    ),
    responses(
        (status = 200, description = "Books by the matching author(s)", body = [BookSummary])
    )
)]
pub async fn list_books_by_author(
    State(state): State<AppState>,
    Path(author): Path<String>,
) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let filter = match author.parse::<i32>() {
        Ok(author_id) => BookFilter::author_id(author_id),
        Err(_) => BookFilter::author(author),
    };

    let books = state.book_repo.find_summaries(filter).await?;
    Ok(Json(books))
}

#[utoipa::path(
    post,
    path = "/api/Books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book,
            headers(("Location" = String, description = "api/Books/{id}"))),
        (status = 400, description = "Malformed body, unknown author or constraint violation")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(book) = payload?;
    let created = state.book_repo.create(book).await?;
    let id = created
        .book_id
        .ok_or_else(|| DomainError::Internal("Store returned a book without id".to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, book_location(id))],
        Json(created),
    ))
}

#[utoipa::path(
    put,
    path = "/api/Books",
    request_body = Book,
    responses(
        (status = 200, description = "Book replaced; body is its reference", body = String),
        (status = 400, description = "Malformed body, missing BookId, unknown author or constraint violation"),
        (status = 404, description = "No book with this id")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(book) = payload?;
    let updated = state.book_repo.update(book).await?;
    let id = updated
        .book_id
        .ok_or_else(|| DomainError::Internal("Store returned a book without id".to_string()))?;

    Ok(Json(book_location(id)))
}

#[utoipa::path(
    delete,
    path = "/api/Books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No book with this id")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.book_repo.delete(id).await?;
    Ok(StatusCode::OK)
}
