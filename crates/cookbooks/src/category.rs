use serde::{Deserialize, Serialize};

use larder_core::{CategoryId, RecipeId};

/// A recipe category as referenced by a cookbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Minimal recipe shape embedded in cookbook responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub recipe_category: Vec<RecipeCategory>,
}

impl RecipeSummary {
    pub fn in_category(&self, category_id: CategoryId) -> bool {
        self.recipe_category.iter().any(|c| c.id == category_id)
    }

    pub fn in_any(&self, category_ids: &[CategoryId]) -> bool {
        category_ids.iter().any(|id| self.in_category(*id))
    }
}

/// A category expanded with the recipes filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: RecipeCategory,
    pub recipes: Vec<RecipeSummary>,
}

/// Pair each category with the recipes (from `recipes`) tagged with it.
///
/// Category order is preserved; a recipe tagged with several of the
/// categories appears under each of them.
pub fn expand_categories(categories: &[RecipeCategory], recipes: &[RecipeSummary]) -> Vec<CategoryDetail> {
    categories
        .iter()
        .map(|category| CategoryDetail {
            category: category.clone(),
            recipes: recipes
                .iter()
                .filter(|r| r.in_category(category.id))
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> RecipeCategory {
        RecipeCategory {
            id: CategoryId::new(),
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    fn recipe(name: &str, categories: &[&RecipeCategory]) -> RecipeSummary {
        RecipeSummary {
            id: RecipeId::new(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            recipe_category: categories.iter().map(|c| (*c).clone()).collect(),
        }
    }

    #[test]
    fn expands_each_category_with_its_recipes() {
        let soups = category("Soups");
        let bread = category("Bread");
        let minestrone = recipe("Minestrone", &[&soups]);
        let focaccia = recipe("Focaccia", &[&bread]);
        let bread_soup = recipe("Ribollita", &[&soups, &bread]);

        let details = expand_categories(
            &[soups.clone(), bread.clone()],
            &[minestrone.clone(), focaccia.clone(), bread_soup.clone()],
        );

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].category, soups);
        assert_eq!(details[0].recipes, vec![minestrone, bread_soup.clone()]);
        assert_eq!(details[1].category, bread);
        assert_eq!(details[1].recipes, vec![focaccia, bread_soup]);
    }

    #[test]
    fn category_without_recipes_expands_to_empty_list() {
        let desserts = category("Desserts");
        let details = expand_categories(&[desserts], &[]);
        assert!(details[0].recipes.is_empty());
    }

    #[test]
    fn detail_serializes_flat() {
        let soups = category("Soups");
        let json = serde_json::to_value(CategoryDetail {
            category: soups.clone(),
            recipes: vec![],
        })
        .unwrap();

        assert_eq!(json["id"], soups.id.to_string());
        assert_eq!(json["name"], "Soups");
        assert!(json["recipes"].as_array().unwrap().is_empty());
    }
}
