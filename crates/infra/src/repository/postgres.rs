//! Postgres-backed cookbook repository.
//!
//! ## Error Mapping
//!
//! | SQLx error | SQLSTATE | `RepositoryError` |
//! |------------|----------|-------------------|
//! | Database (unique violation) | `23505` | `Integrity` |
//! | Database (foreign key / check violation) | `23503` / `23514` | `Integrity` |
//! | Database (insufficient privilege) | `42501` | `PermissionDenied` |
//! | anything else | | `Storage` |
//!
//! Every statement carries `group_id` in its `WHERE` clause or insert list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use tracing::instrument;

use larder_cookbooks::{CookBook, CookBookKey, RecipeCategory, SaveCookBook, Slug};
use larder_core::{CookBookId, GroupId};

use super::{CookBookRepository, RepositoryError};

#[derive(Debug, Clone)]
pub struct PostgresCookBookRepository {
    pool: PgPool,
}

impl PostgresCookBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CookBookRepository for PostgresCookBookRepository {
    #[instrument(skip(self), fields(group_id = %group_id), err)]
    async fn get_all(&self, group_id: GroupId) -> Result<Vec<CookBook>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, name, description, slug, position, public, categories, created_at, updated_at
            FROM cookbooks
            WHERE group_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(group_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all", e))?;

        rows.iter().map(row_to_cookbook).collect()
    }

    #[instrument(skip(self), fields(group_id = %group_id, match_attr = key.match_attr()), err)]
    async fn get_one(&self, group_id: GroupId, key: &CookBookKey) -> Result<Option<CookBook>, RepositoryError> {
        let query = match key {
            CookBookKey::Id(id) => sqlx::query(
                r#"
                SELECT id, group_id, name, description, slug, position, public, categories, created_at, updated_at
                FROM cookbooks
                WHERE group_id = $1 AND id = $2
                "#,
            )
            .bind(*group_id.as_uuid())
            .bind(*id.as_uuid()),
            CookBookKey::Slug(slug) => sqlx::query(
                r#"
                SELECT id, group_id, name, description, slug, position, public, categories, created_at, updated_at
                FROM cookbooks
                WHERE group_id = $1 AND slug = $2
                "#,
            )
            .bind(*group_id.as_uuid())
            .bind(slug.clone()),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_one", e))?;

        row.as_ref().map(row_to_cookbook).transpose()
    }

    #[instrument(skip(self, data), fields(group_id = %data.group_id, slug = %data.slug), err)]
    async fn create(&self, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO cookbooks (id, group_id, name, description, slug, position, public, categories)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, group_id, name, description, slug, position, public, categories, created_at, updated_at
            "#,
        )
        .bind(*CookBookId::new().as_uuid())
        .bind(data.group_id.as_uuid())
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.slug.as_str())
        .bind(data.position)
        .bind(data.public)
        .bind(Json(&data.categories))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        row_to_cookbook(&row)
    }

    #[instrument(skip(self, data), fields(group_id = %data.group_id, cookbook_id = %id), err)]
    async fn update(&self, id: CookBookId, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE cookbooks SET
                name = $3,
                description = $4,
                slug = $5,
                position = $6,
                public = $7,
                categories = $8,
                updated_at = NOW()
            WHERE group_id = $1 AND id = $2
            RETURNING id, group_id, name, description, slug, position, public, categories, created_at, updated_at
            "#,
        )
        .bind(data.group_id.as_uuid())
        .bind(id.as_uuid())
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.slug.as_str())
        .bind(data.position)
        .bind(data.public)
        .bind(Json(&data.categories))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        match row {
            Some(row) => row_to_cookbook(&row),
            None => Err(RepositoryError::NotFound(format!("cookbook {id}"))),
        }
    }

    #[instrument(skip(self), fields(group_id = %group_id, cookbook_id = %id), err)]
    async fn delete(&self, group_id: GroupId, id: CookBookId) -> Result<CookBook, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM cookbooks
            WHERE group_id = $1 AND id = $2
            RETURNING id, group_id, name, description, slug, position, public, categories, created_at, updated_at
            "#,
        )
        .bind(group_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("delete", e))?;

        match row {
            Some(row) => row_to_cookbook(&row),
            None => Err(RepositoryError::NotFound(format!("cookbook {id}"))),
        }
    }
}

fn row_to_cookbook(row: &sqlx::postgres::PgRow) -> Result<CookBook, RepositoryError> {
    let decode = |e: sqlx::Error| RepositoryError::storage("decode_cookbook", e.to_string());

    let stored_slug: String = row.try_get("slug").map_err(decode)?;
    let slug = Slug::from_stored(stored_slug)
        .map_err(|e| RepositoryError::storage("decode_cookbook", e.to_string()))?;
    let categories: Json<Vec<RecipeCategory>> = row.try_get("categories").map_err(decode)?;

    Ok(CookBook {
        id: CookBookId::from_uuid(row.try_get::<uuid::Uuid, _>("id").map_err(decode)?),
        group_id: GroupId::from_uuid(row.try_get::<uuid::Uuid, _>("group_id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        slug,
        position: row.try_get("position").map_err(decode)?,
        public: row.try_get("public").map_err(decode)?,
        categories: categories.0,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").map_err(decode)?,
    })
}

/// Map SQLx errors onto the repository taxonomy.
pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") | Some("23503") | Some("23514") => RepositoryError::Integrity(msg),
                Some("42501") => RepositoryError::PermissionDenied(msg),
                _ => RepositoryError::storage(operation, msg),
            }
        }
        sqlx::Error::PoolClosed => RepositoryError::storage(operation, "connection pool closed"),
        other => RepositoryError::storage(operation, other.to_string()),
    }
}
