use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use larder_core::{CategoryId, CookBookId, DomainError, DomainResult, Entity, GroupId};

use crate::{RecipeCategory, Slug};

/// Position given to cookbooks created without one.
pub const DEFAULT_POSITION: i32 = 1;

fn default_position() -> i32 {
    DEFAULT_POSITION
}

/// Payload for creating a cookbook (and for replacing one by id).
///
/// Unknown fields are ignored, so a client-supplied `group_id` or `slug`
/// never reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCookBook {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_position")]
    pub position: i32,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub categories: Vec<RecipeCategory>,
}

impl CreateCookBook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            position: DEFAULT_POSITION,
            public: false,
            categories: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    pub fn with_categories(mut self, categories: Vec<RecipeCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Validate and bind the payload to a group.
    pub fn into_save(self, group_id: GroupId) -> DomainResult<SaveCookBook> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("cookbook name cannot be empty"));
        }
        let slug = Slug::from_name(name)?;

        Ok(SaveCookBook {
            group_id,
            name: name.to_string(),
            description: self.description,
            slug,
            position: self.position,
            public: self.public,
            categories: self.categories,
        })
    }
}

/// One item of a bulk update: a full payload plus the id it replaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCookBook {
    pub id: CookBookId,
    #[serde(flatten)]
    pub data: CreateCookBook,
}

/// Validated, group-bound payload handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveCookBook {
    pub group_id: GroupId,
    pub name: String,
    pub description: String,
    pub slug: Slug,
    pub position: i32,
    pub public: bool,
    pub categories: Vec<RecipeCategory>,
}

/// A stored cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookBook {
    pub id: CookBookId,
    pub group_id: GroupId,
    pub name: String,
    pub description: String,
    pub slug: Slug,
    pub position: i32,
    pub public: bool,
    pub categories: Vec<RecipeCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CookBook {
    pub fn from_save(id: CookBookId, save: SaveCookBook, now: DateTime<Utc>) -> Self {
        Self {
            id,
            group_id: save.group_id,
            name: save.name,
            description: save.description,
            slug: save.slug,
            position: save.position,
            public: save.public,
            categories: save.categories,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields. `id`, `group_id` and `created_at` are kept.
    pub fn apply(&mut self, save: SaveCookBook, now: DateTime<Utc>) {
        self.name = save.name;
        self.description = save.description;
        self.slug = save.slug;
        self.position = save.position;
        self.public = save.public;
        self.categories = save.categories;
        self.updated_at = now;
    }

    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

impl Entity for CookBook {
    type Id = CookBookId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Sort cookbooks by `position`, ascending. Ties keep their incoming order.
pub fn order_by_position(mut books: Vec<CookBook>) -> Vec<CookBook> {
    books.sort_by_key(|b| b.position);
    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stored(name: &str, position: i32) -> CookBook {
        let save = CreateCookBook::new(name)
            .with_position(position)
            .into_save(GroupId::new())
            .unwrap();
        CookBook::from_save(CookBookId::new(), save, Utc::now())
    }

    #[test]
    fn into_save_binds_group_and_derives_slug() {
        let group_id = GroupId::new();
        let save = CreateCookBook::new("  Holiday Baking ").into_save(group_id).unwrap();

        assert_eq!(save.group_id, group_id);
        assert_eq!(save.name, "Holiday Baking");
        assert_eq!(save.slug.as_str(), "holiday-baking");
        assert_eq!(save.position, DEFAULT_POSITION);
    }

    #[test]
    fn into_save_rejects_blank_name() {
        let err = CreateCookBook::new("   ").into_save(GroupId::new()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deserialize_applies_defaults_and_ignores_foreign_group() {
        let foreign = GroupId::new();
        let payload: CreateCookBook = serde_json::from_value(serde_json::json!({
            "name": "Salads",
            "group_id": foreign.to_string(),
            "slug": "something-else",
        }))
        .unwrap();

        assert_eq!(payload, CreateCookBook::new("Salads"));

        let mine = GroupId::new();
        let save = payload.into_save(mine).unwrap();
        assert_eq!(save.group_id, mine);
        assert_eq!(save.slug.as_str(), "salads");
    }

    #[test]
    fn update_payload_requires_id() {
        let missing = serde_json::from_value::<UpdateCookBook>(serde_json::json!({ "name": "Soups" }));
        assert!(missing.is_err());

        let id = CookBookId::new();
        let ok: UpdateCookBook = serde_json::from_value(serde_json::json!({
            "id": id.to_string(),
            "name": "Soups",
            "position": 4,
        }))
        .unwrap();
        assert_eq!(ok.id, id);
        assert_eq!(ok.data.position, 4);
    }

    #[test]
    fn apply_keeps_identity_and_group() {
        let mut book = stored("Soups", 1);
        let (id, group_id, created_at) = (book.id, book.group_id, book.created_at);

        let save = CreateCookBook::new("Soups & Stews")
            .with_position(7)
            .into_save(GroupId::new())
            .unwrap();
        book.apply(save, Utc::now());

        assert_eq!(book.id, id);
        assert_eq!(book.group_id, group_id);
        assert_eq!(book.created_at, created_at);
        assert_eq!(book.slug.as_str(), "soups-stews");
        assert_eq!(book.position, 7);
    }

    #[test]
    fn order_by_position_is_stable_for_ties() {
        let a = stored("A", 2);
        let b = stored("B", 1);
        let c = stored("C", 2);

        let ordered = order_by_position(vec![a.clone(), b.clone(), c.clone()]);
        let names: Vec<_> = ordered.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    proptest! {
        #[test]
        fn order_by_position_is_ascending(positions in proptest::collection::vec(-50i32..50, 0..30)) {
            let books: Vec<_> = positions.iter().map(|p| stored("Book", *p)).collect();
            let ordered = order_by_position(books);
            prop_assert_eq!(ordered.len(), positions.len());
            prop_assert!(ordered.windows(2).all(|w| w[0].position <= w[1].position));
        }
    }
}
