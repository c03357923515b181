use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use larder_cookbooks::{CookBook, CookBookKey, SaveCookBook};
use larder_core::{CookBookId, Entity, GroupId};

use super::{CookBookRepository, RepositoryError};
use crate::store::{GroupStore, InMemoryGroupStore, StoreError};

/// In-process cookbook repository for tests and development.
///
/// Enforces the same `(group_id, slug)` uniqueness as the Postgres schema.
#[derive(Debug, Default)]
pub struct InMemoryCookBookRepository {
    store: InMemoryGroupStore<CookBookId, CookBook>,
    // Serializes check-then-write so two writers cannot claim one slug.
    writes: Mutex<()>,
}

impl InMemoryCookBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_taken(&self, data: &SaveCookBook, except: Option<CookBookId>) -> Result<bool, StoreError> {
        Ok(self
            .store
            .list(data.group_id)?
            .iter()
            .any(|b| b.slug == data.slug && Some(b.id) != except))
    }
}

fn store_failure(operation: &'static str) -> impl Fn(StoreError) -> RepositoryError {
    move |e| RepositoryError::storage(operation, e.to_string())
}

fn slug_conflict(data: &SaveCookBook) -> RepositoryError {
    RepositoryError::Integrity(format!(
        "slug '{}' already exists in group {}",
        data.slug, data.group_id
    ))
}

#[async_trait]
impl CookBookRepository for InMemoryCookBookRepository {
    async fn get_all(&self, group_id: GroupId) -> Result<Vec<CookBook>, RepositoryError> {
        self.store.list(group_id).map_err(store_failure("get_all"))
    }

    async fn get_one(&self, group_id: GroupId, key: &CookBookKey) -> Result<Option<CookBook>, RepositoryError> {
        let found = match key {
            CookBookKey::Id(id) => self.store.get(group_id, id),
            CookBookKey::Slug(slug) => self
                .store
                .list(group_id)
                .map(|books| books.into_iter().find(|b| b.slug.as_str() == slug)),
        };
        found.map_err(store_failure("get_one"))
    }

    async fn create(&self, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        let _guard = self
            .writes
            .lock()
            .map_err(|_| RepositoryError::storage("create", "write lock poisoned"))?;

        if self.slug_taken(&data, None).map_err(store_failure("create"))? {
            return Err(slug_conflict(&data));
        }

        let group_id = data.group_id;
        let book = CookBook::from_save(CookBookId::new(), data, Utc::now());
        self.store
            .upsert(group_id, *book.id(), book.clone())
            .map_err(store_failure("create"))?;
        Ok(book)
    }

    async fn update(&self, id: CookBookId, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        let _guard = self
            .writes
            .lock()
            .map_err(|_| RepositoryError::storage("update", "write lock poisoned"))?;

        let group_id = data.group_id;
        let mut book = self
            .store
            .get(group_id, &id)
            .map_err(store_failure("update"))?
            .ok_or_else(|| RepositoryError::NotFound(format!("cookbook {id}")))?;

        if self.slug_taken(&data, Some(id)).map_err(store_failure("update"))? {
            return Err(slug_conflict(&data));
        }

        book.apply(data, Utc::now());
        self.store
            .upsert(group_id, id, book.clone())
            .map_err(store_failure("update"))?;
        Ok(book)
    }

    async fn delete(&self, group_id: GroupId, id: CookBookId) -> Result<CookBook, RepositoryError> {
        let _guard = self
            .writes
            .lock()
            .map_err(|_| RepositoryError::storage("delete", "write lock poisoned"))?;

        self.store
            .remove(group_id, &id)
            .map_err(store_failure("delete"))?
            .ok_or_else(|| RepositoryError::NotFound(format!("cookbook {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_cookbooks::CreateCookBook;

    use crate::repository::RepositoryErrorKind;

    fn save(group_id: GroupId, name: &str) -> SaveCookBook {
        CreateCookBook::new(name).into_save(group_id).unwrap()
    }

    #[tokio::test]
    async fn create_then_lookup_by_id_and_slug() {
        let repo = InMemoryCookBookRepository::new();
        let g = GroupId::new();

        let created = repo.create(save(g, "Quick Lunches")).await.unwrap();
        assert_eq!(created.group_id, g);

        let by_id = repo.get_one(g, &CookBookKey::Id(created.id)).await.unwrap();
        let by_slug = repo
            .get_one(g, &CookBookKey::Slug("quick-lunches".to_string()))
            .await
            .unwrap();
        assert_eq!(by_id, Some(created.clone()));
        assert_eq!(by_slug, Some(created));
    }

    #[tokio::test]
    async fn duplicate_slug_in_group_is_an_integrity_error() {
        let repo = InMemoryCookBookRepository::new();
        let g = GroupId::new();
        repo.create(save(g, "Soups")).await.unwrap();

        let err = repo.create(save(g, "SOUPS!")).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::Integrity);

        // Same slug in another group is fine.
        repo.create(save(GroupId::new(), "Soups")).await.unwrap();
    }

    #[tokio::test]
    async fn update_can_keep_its_own_slug() {
        let repo = InMemoryCookBookRepository::new();
        let g = GroupId::new();
        let book = repo.create(save(g, "Soups")).await.unwrap();

        let mut data = save(g, "Soups");
        data.position = 9;
        let updated = repo.update(book.id, data).await.unwrap();
        assert_eq!(updated.position, 9);
        assert_eq!(updated.created_at, book.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_do_not_cross_groups() {
        let repo = InMemoryCookBookRepository::new();
        let (mine, theirs) = (GroupId::new(), GroupId::new());
        let book = repo.create(save(mine, "Soups")).await.unwrap();

        let err = repo.update(book.id, save(theirs, "Hijacked")).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::NotFound);

        let err = repo.delete(theirs, book.id).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::NotFound);

        assert_eq!(repo.get_all(mine).await.unwrap(), vec![book]);
    }

    #[tokio::test]
    async fn delete_removes_and_returns_record() {
        let repo = InMemoryCookBookRepository::new();
        let g = GroupId::new();
        let book = repo.create(save(g, "Soups")).await.unwrap();

        let deleted = repo.delete(g, book.id).await.unwrap();
        assert_eq!(deleted, book);
        assert_eq!(repo.get_one(g, &CookBookKey::Id(book.id)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_storage_error() {
        let repo = InMemoryCookBookRepository::new();
        let g = GroupId::new();
        repo.store.poison();

        let err = repo.create(save(g, "Soups")).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::Storage);

        let err = repo.get_all(g).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::Storage);
    }

    #[tokio::test]
    async fn group_view_refuses_payload_for_other_group() {
        let repo = InMemoryCookBookRepository::new();
        let repo: &dyn CookBookRepository = &repo;
        let g = GroupId::new();

        let err = repo.by_group(g).create(save(GroupId::new(), "Soups")).await.unwrap_err();
        assert_eq!(err.kind(), RepositoryErrorKind::PermissionDenied);

        let created = repo.by_group(g).create(save(g, "Soups")).await.unwrap();
        assert_eq!(repo.by_group(g).get_all().await.unwrap(), vec![created]);
    }
}
