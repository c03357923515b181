//! Infrastructure layer: cookbook repositories, the recipe catalog and
//! database wiring.

pub mod catalog;
pub mod db;
pub mod repository;
pub mod store;

pub use catalog::{InMemoryRecipeCatalog, PostgresRecipeCatalog, RecipeCatalog};
pub use repository::{
    CookBookRepository, GroupCookBooks, InMemoryCookBookRepository, PostgresCookBookRepository,
    RepositoryError, RepositoryErrorKind,
};
