use crate::api;
use crate::domain::{BookDetail, BookSummary};
use crate::models::Book;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book_or_genre,
        api::books::get_book_detail,
        api::books::list_books_by_author,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    components(schemas(Book, BookSummary, BookDetail)),
    tags(
        (name = "books-api", description = "Books API")
    )
)]
pub struct ApiDoc;
