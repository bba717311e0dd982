pub mod author;
pub mod book;

pub use book::Book;
