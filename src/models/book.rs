use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub genre: Option<String>,
    pub publish_date: Option<Date>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub author_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Wire shape of a persisted book, used as both request and response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    #[serde(default)]
    pub book_id: Option<i32>,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub publish_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    pub author_id: i32,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            book_id: Some(model.id),
            title: model.title,
            genre: model.genre,
            publish_date: model.publish_date,
            price: model.price,
            description: model.description,
            author_id: model.author_id,
        }
    }
}

// Every column is Set, so an update through this model overwrites the whole row.
impl From<Book> for ActiveModel {
    fn from(book: Book) -> Self {
        Self {
            id: book.book_id.map_or(NotSet, Set),
            title: Set(book.title),
            genre: Set(book.genre),
            publish_date: Set(book.publish_date),
            price: Set(book.price),
            description: Set(book.description),
            author_id: Set(book.author_id),
        }
    }
}
