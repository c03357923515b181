//! `larder-core`: foundation building blocks shared by every Larder crate.
//!
//! Identifiers, the domain error type and a couple of marker traits. No IO.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, CookBookId, GroupId, RecipeId};
pub use value_object::ValueObject;
