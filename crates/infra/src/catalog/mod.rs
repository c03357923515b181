//! Recipe lookups used to expand cookbooks in responses.
//!
//! Cookbooks reference categories, not recipes; the recipes shown with a
//! cookbook are whatever the group has filed under those categories.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;

use larder_cookbooks::RecipeSummary;
use larder_core::{CategoryId, GroupId};

use crate::repository::RepositoryError;

pub use in_memory::InMemoryRecipeCatalog;
pub use postgres::PostgresRecipeCatalog;

#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Recipes of `group_id` tagged with at least one of `category_ids`,
    /// ordered by name. An empty id list yields no recipes.
    async fn recipes_in_categories(
        &self,
        group_id: GroupId,
        category_ids: &[CategoryId],
    ) -> Result<Vec<RecipeSummary>, RepositoryError>;
}
