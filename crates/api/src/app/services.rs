use std::sync::Arc;

use larder_cookbooks::{CookBook, RecipeSummary, expand_categories};
use larder_core::{CategoryId, GroupId};
use larder_infra::{
    db, CookBookRepository, GroupCookBooks, InMemoryCookBookRepository, InMemoryRecipeCatalog,
    PostgresCookBookRepository, PostgresRecipeCatalog, RecipeCatalog, RepositoryError,
};

use crate::app::dto;
use crate::config::ApiConfig;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppServices {
    cookbooks: Arc<dyn CookBookRepository>,
    recipes: Arc<dyn RecipeCatalog>,
}

impl AppServices {
    pub fn new(cookbooks: Arc<dyn CookBookRepository>, recipes: Arc<dyn RecipeCatalog>) -> Self {
        Self { cookbooks, recipes }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCookBookRepository::new()),
            Arc::new(InMemoryRecipeCatalog::new()),
        )
    }

    /// Cookbook repository scoped to one group.
    pub fn cookbooks(&self, group_id: GroupId) -> GroupCookBooks<'_> {
        self.cookbooks.by_group(group_id)
    }

    /// Summary JSON (`recipes` attached) for each book, in the given order.
    ///
    /// One catalog lookup covers every category referenced by `books`.
    pub async fn summaries(
        &self,
        group_id: GroupId,
        books: &[CookBook],
    ) -> Result<Vec<serde_json::Value>, RepositoryError> {
        let mut category_ids: Vec<CategoryId> = Vec::new();
        for id in books.iter().flat_map(|b| b.category_ids()) {
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }

        let recipes = self.recipes.recipes_in_categories(group_id, &category_ids).await?;

        Ok(books
            .iter()
            .map(|book| dto::summary_to_json(book, recipes_for(book, &recipes)))
            .collect())
    }

    pub async fn summary(&self, group_id: GroupId, book: &CookBook) -> Result<serde_json::Value, RepositoryError> {
        let mut items = self.summaries(group_id, std::slice::from_ref(book)).await?;
        Ok(items.pop().unwrap_or(serde_json::Value::Null))
    }

    /// Expanded JSON: every category carries the recipes filed under it.
    pub async fn expanded(&self, group_id: GroupId, book: &CookBook) -> Result<serde_json::Value, RepositoryError> {
        let recipes = self
            .recipes
            .recipes_in_categories(group_id, &book.category_ids())
            .await?;
        let details = expand_categories(&book.categories, &recipes);
        Ok(dto::expanded_to_json(book, recipes, details))
    }
}

fn recipes_for(book: &CookBook, recipes: &[RecipeSummary]) -> Vec<RecipeSummary> {
    let ids = book.category_ids();
    recipes.iter().filter(|r| r.in_any(&ids)).cloned().collect()
}

/// Wire services from configuration: Postgres when a database is configured,
/// in-memory otherwise.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL not set; cookbooks are kept in memory and lost on restart");
        return Ok(AppServices::in_memory());
    };

    let pool = db::connect(&database.url, database.max_connections).await?;
    if database.run_migrations {
        db::run_migrations(&pool).await?;
    }
    tracing::info!(max_connections = database.max_connections, "connected to postgres");

    Ok(AppServices::new(
        Arc::new(PostgresCookBookRepository::new(pool.clone())),
        Arc::new(PostgresRecipeCatalog::new(pool)),
    ))
}
