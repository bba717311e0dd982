//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::domain::{BookDetail, BookFilter, BookRepository, BookSummary, DomainError};
use crate::models::Book;
use crate::models::author::{self, Entity as AuthorEntity};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<(Book, String)>, DomainError> {
        let row = BookEntity::find_by_id(id)
            .find_also_related(AuthorEntity)
            .one(&self.db)
            .await?;

        Ok(row.map(|(book, author)| joined(book, author)))
    }
}

/// Pair a stored book with its author's name.
fn joined(book: Model, author: Option<author::Model>) -> (Book, String) {
    let name = match author {
        Some(author) => author.name,
        None => {
            tracing::warn!(
                "Book {} references missing author {}",
                book.id,
                book.author_id
            );
            String::new()
        }
    };
    (Book::from(book), name)
}

/// `col LIKE '%needle%'` with the LIKE metacharacters in `needle` escaped,
/// so the needle only ever matches itself.
fn contains_literal(col: impl IntoColumnRef, needle: &str) -> SimpleExpr {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Expr::col(col).like(LikeExpr::new(format!("%{}%", escaped)).escape('\\'))
}

async fn ensure_author_exists<C: ConnectionTrait>(
    conn: &C,
    author_id: i32,
) -> Result<(), DomainError> {
    match AuthorEntity::find_by_id(author_id).one(conn).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::Validation(format!(
            "Author {} does not exist",
            author_id
        ))),
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_summaries(&self, filter: BookFilter) -> Result<Vec<BookSummary>, DomainError> {
        tracing::debug!("Find books - Filter: {:?}", filter);

        let mut query = BookEntity::find().find_also_related(AuthorEntity);

        if let Some(genre) = &filter.genre
            && !genre.is_empty()
        {
            query = query.filter(contains_literal((BookEntity, Column::Genre), genre));
        }

        if let Some(name) = &filter.author
            && !name.is_empty()
        {
            query = query.filter(contains_literal((AuthorEntity, author::Column::Name), name));
        }

        if let Some(author_id) = filter.author_id {
            query = query.filter(Column::AuthorId.eq(author_id));
        }

        let rows = query.order_by_asc(Column::Id).all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|(book, author)| {
                let (book, name) = joined(book, author);
                BookSummary::project(book, name)
            })
            .collect())
    }

    async fn find_summary(&self, id: i32) -> Result<Option<BookSummary>, DomainError> {
        Ok(self
            .find_with_author(id)
            .await?
            .map(|(book, name)| BookSummary::project(book, name)))
    }

    async fn find_detail(&self, id: i32) -> Result<Option<BookDetail>, DomainError> {
        Ok(self
            .find_with_author(id)
            .await?
            .map(|(book, name)| BookDetail::project(book, name)))
    }

    async fn create(&self, book: Book) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;

        ensure_author_exists(&txn, book.author_id).await?;

        // Ids are always assigned by the store
        let new_book: ActiveModel = Book {
            book_id: None,
            ..book
        }
        .into();
        let model = new_book.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!("Created book {} ({})", model.id, model.title);
        Ok(Book::from(model))
    }

    async fn update(&self, book: Book) -> Result<Book, DomainError> {
        let id = book
            .book_id
            .ok_or_else(|| DomainError::Validation("BookId is required".to_string()))?;

        let txn = self.db.begin().await?;

        BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        ensure_author_exists(&txn, book.author_id).await?;

        let active: ActiveModel = book.into();
        let model = active.update(&txn).await?;

        txn.commit().await?;

        tracing::info!("Updated book {}", model.id);
        Ok(Book::from(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        existing.delete(&txn).await?;

        txn.commit().await?;

        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
