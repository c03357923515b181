use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use larder_cookbooks::{RecipeCategory, RecipeSummary};
use larder_core::{CategoryId, GroupId, RecipeId};

use super::RecipeCatalog;
use crate::repository::RepositoryError;
use crate::repository::postgres::map_sqlx_error;

/// Reads the `recipes` table; category membership lives in its
/// `recipe_category` JSONB array.
#[derive(Debug, Clone)]
pub struct PostgresRecipeCatalog {
    pool: PgPool,
}

impl PostgresRecipeCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeCatalog for PostgresRecipeCatalog {
    #[instrument(skip(self, category_ids), fields(group_id = %group_id, categories = category_ids.len()), err)]
    async fn recipes_in_categories(
        &self,
        group_id: GroupId,
        category_ids: &[CategoryId],
    ) -> Result<Vec<RecipeSummary>, RepositoryError> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<uuid::Uuid> = category_ids.iter().map(|c| *c.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT r.id, r.name, r.slug, r.recipe_category
            FROM recipes r
            WHERE r.group_id = $1
              AND EXISTS (
                SELECT 1
                FROM jsonb_array_elements(r.recipe_category) AS c
                WHERE (c->>'id')::uuid = ANY($2)
              )
            ORDER BY r.name
            "#,
        )
        .bind(*group_id.as_uuid())
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("recipes_in_categories", e))?;

        rows.iter().map(row_to_recipe).collect()
    }
}

fn row_to_recipe(row: &sqlx::postgres::PgRow) -> Result<RecipeSummary, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::storage("decode_recipe", e.to_string());
    let categories: Json<Vec<RecipeCategory>> = row.try_get("recipe_category").map_err(decode)?;

    Ok(RecipeSummary {
        id: RecipeId::from_uuid(row.try_get::<uuid::Uuid, _>("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        slug: row.try_get("slug").map_err(decode)?,
        recipe_category: categories.0,
    })
}
