//! JSON shapes returned by the cookbook routes.
//!
//! - read: the stored record
//! - summary: read + `recipes`
//! - expanded: summary with each category carrying its own `recipes`

use serde_json::{json, Value};

use larder_cookbooks::{CategoryDetail, CookBook, RecipeSummary};

pub fn cookbook_to_json(book: &CookBook) -> Value {
    json!({
        "id": book.id.to_string(),
        "group_id": book.group_id.to_string(),
        "name": book.name,
        "description": book.description,
        "slug": book.slug.as_str(),
        "position": book.position,
        "public": book.public,
        "categories": book.categories,
        "created_at": book.created_at.to_rfc3339(),
        "updated_at": book.updated_at.to_rfc3339(),
    })
}

pub fn summary_to_json(book: &CookBook, recipes: Vec<RecipeSummary>) -> Value {
    let mut value = cookbook_to_json(book);
    value["recipes"] = json!(recipes);
    value
}

pub fn expanded_to_json(book: &CookBook, recipes: Vec<RecipeSummary>, categories: Vec<CategoryDetail>) -> Value {
    let mut value = summary_to_json(book, recipes);
    value["categories"] = json!(categories);
    value
}
