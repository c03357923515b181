use async_trait::async_trait;

use larder_cookbooks::RecipeSummary;
use larder_core::{CategoryId, GroupId, RecipeId};

use super::RecipeCatalog;
use crate::repository::RepositoryError;
use crate::store::{GroupStore, InMemoryGroupStore};

/// Seedable in-process recipe catalog.
#[derive(Debug, Default)]
pub struct InMemoryRecipeCatalog {
    recipes: InMemoryGroupStore<RecipeId, RecipeSummary>,
}

impl InMemoryRecipeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, group_id: GroupId, recipe: RecipeSummary) -> Result<(), RepositoryError> {
        self.recipes
            .upsert(group_id, recipe.id, recipe)
            .map_err(|e| RepositoryError::storage("add_recipe", e.to_string()))
    }
}

#[async_trait]
impl RecipeCatalog for InMemoryRecipeCatalog {
    async fn recipes_in_categories(
        &self,
        group_id: GroupId,
        category_ids: &[CategoryId],
    ) -> Result<Vec<RecipeSummary>, RepositoryError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: Vec<_> = self
            .recipes
            .list(group_id)
            .map_err(|e| RepositoryError::storage("recipes_in_categories", e.to_string()))?
            .into_iter()
            .filter(|r| r.in_any(category_ids))
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }
}
