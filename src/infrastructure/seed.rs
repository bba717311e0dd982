use crate::models::{author, book};
use sea_orm::*;

const DEMO_AUTHORS: [&str; 3] = ["J.R.R. Tolkien", "Isaac Asimov", "Frank Herbert"];

/// Demo books as (title, genre, publish date, price, description, author name)
const DEMO_BOOKS: [(&str, &str, (i32, u32, u32), f64, &str, &str); 3] = [
    (
        "The Hobbit",
        "Fantasy",
        (1937, 9, 21),
        12.5,
        "A hobbit is swept into a quest for dragon gold.",
        "J.R.R. Tolkien",
    ),
    (
        "Foundation",
        "SciFi",
        (1951, 6, 1),
        8.99,
        "A mathematician foresees the fall of the Galactic Empire.",
        "Isaac Asimov",
    ),
    (
        "Dune",
        "SciFi",
        (1965, 8, 1),
        9.99,
        "A spice planet story.",
        "Frank Herbert",
    ),
];

/// Insert demo authors and books. Records that already exist (matched by
/// name or title) are left alone, so running this twice is harmless.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    for name in DEMO_AUTHORS {
        let existing = author::Entity::find()
            .filter(author::Column::Name.eq(name))
            .one(&txn)
            .await?;
        if existing.is_none() {
            author::ActiveModel {
                name: Set(name.to_owned()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }
    }

    for (title, genre, (year, month, day), price, description, author_name) in DEMO_BOOKS {
        let existing = book::Entity::find()
            .filter(book::Column::Title.eq(title))
            .one(&txn)
            .await?;
        if existing.is_some() {
            continue;
        }

        let Some(author) = author::Entity::find()
            .filter(author::Column::Name.eq(author_name))
            .one(&txn)
            .await?
        else {
            continue;
        };

        book::ActiveModel {
            title: Set(title.to_owned()),
            genre: Set(Some(genre.to_owned())),
            publish_date: Set(chrono::NaiveDate::from_ymd_opt(year, month, day)),
            price: Set(Some(price)),
            description: Set(Some(description.to_owned())),
            author_id: Set(author.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await
}
