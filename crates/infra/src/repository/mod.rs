//! Cookbook persistence boundary.
//!
//! The API never touches storage directly: it asks a `CookBookRepository`,
//! normally through the group-scoped `GroupCookBooks` view.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use larder_cookbooks::{CookBook, CookBookKey, SaveCookBook};
use larder_core::{CookBookId, GroupId};

pub use in_memory::InMemoryCookBookRepository;
pub use postgres::PostgresCookBookRepository;

/// Failure raised by a repository.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("no entry found: {0}")]
    NotFound(String),

    /// A uniqueness or referential constraint rejected the write.
    #[error("integrity violation: {0}")]
    Integrity(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("storage failure in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },
}

/// Coarse classification of a `RepositoryError`, used for error translation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    NotFound,
    Integrity,
    PermissionDenied,
    Storage,
}

impl RepositoryError {
    pub fn kind(&self) -> RepositoryErrorKind {
        match self {
            Self::NotFound(_) => RepositoryErrorKind::NotFound,
            Self::Integrity(_) => RepositoryErrorKind::Integrity,
            Self::PermissionDenied(_) => RepositoryErrorKind::PermissionDenied,
            Self::Storage { .. } => RepositoryErrorKind::Storage,
        }
    }

    pub fn storage(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Storage {
            operation,
            message: message.into(),
        }
    }
}

/// Cookbook storage.
///
/// Every read and write is confined to one group; an id that exists in
/// another group behaves exactly like an id that does not exist.
#[async_trait]
pub trait CookBookRepository: Send + Sync {
    /// All cookbooks of a group, in no particular order.
    async fn get_all(&self, group_id: GroupId) -> Result<Vec<CookBook>, RepositoryError>;

    async fn get_one(&self, group_id: GroupId, key: &CookBookKey) -> Result<Option<CookBook>, RepositoryError>;

    /// Insert a new cookbook into `data.group_id`.
    async fn create(&self, data: SaveCookBook) -> Result<CookBook, RepositoryError>;

    /// Replace the editable fields of cookbook `id` in `data.group_id`.
    async fn update(&self, id: CookBookId, data: SaveCookBook) -> Result<CookBook, RepositoryError>;

    /// Remove cookbook `id` and return what was stored.
    async fn delete(&self, group_id: GroupId, id: CookBookId) -> Result<CookBook, RepositoryError>;
}

impl<'r> dyn CookBookRepository + 'r {
    /// View of the repository bound to a single group.
    pub fn by_group(&self, group_id: GroupId) -> GroupCookBooks<'_> {
        GroupCookBooks { repo: self, group_id }
    }
}

/// A repository bound to one group.
#[derive(Clone, Copy)]
pub struct GroupCookBooks<'a> {
    repo: &'a dyn CookBookRepository,
    group_id: GroupId,
}

impl GroupCookBooks<'_> {
    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub async fn get_all(&self) -> Result<Vec<CookBook>, RepositoryError> {
        self.repo.get_all(self.group_id).await
    }

    pub async fn get_one(&self, key: &CookBookKey) -> Result<Option<CookBook>, RepositoryError> {
        self.repo.get_one(self.group_id, key).await
    }

    pub async fn create(&self, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        self.check_group(&data)?;
        self.repo.create(data).await
    }

    pub async fn update(&self, id: CookBookId, data: SaveCookBook) -> Result<CookBook, RepositoryError> {
        self.check_group(&data)?;
        self.repo.update(id, data).await
    }

    pub async fn delete(&self, id: CookBookId) -> Result<CookBook, RepositoryError> {
        self.repo.delete(self.group_id, id).await
    }

    fn check_group(&self, data: &SaveCookBook) -> Result<(), RepositoryError> {
        if data.group_id != self.group_id {
            return Err(RepositoryError::PermissionDenied(format!(
                "payload is bound to group {} but the view is scoped to {}",
                data.group_id, self.group_id
            )));
        }
        Ok(())
    }
}
