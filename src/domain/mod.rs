//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, read projections and domain error types.

pub mod errors;
pub mod projections;
pub mod repositories;

pub use errors::DomainError;
pub use projections::{BookDetail, BookSummary};
pub use repositories::*;
