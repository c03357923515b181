//! Cookbook schema types.
//!
//! Input payloads (`CreateCookBook`, `UpdateCookBook`), the repository payload
//! (`SaveCookBook`), the stored record (`CookBook`) and the recipe/category
//! shapes used to expand a cookbook in responses. Validation lives here; no IO.

pub mod category;
pub mod cookbook;
pub mod key;
pub mod slug;

pub use category::{CategoryDetail, RecipeCategory, RecipeSummary, expand_categories};
pub use cookbook::{CookBook, CreateCookBook, DEFAULT_POSITION, SaveCookBook, UpdateCookBook, order_by_position};
pub use key::CookBookKey;
pub use slug::Slug;
