//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// `name` is always stored in slug form (see [`crate::util::slugify`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Category enriched with the number of products referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithCount {
    pub id: i64,
    pub name: String,
    /// Product count
    pub items: u64,
}

impl CategoryWithCount {
    pub fn new(category: Category, items: u64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            items,
        }
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryCreate {
    #[serde(default)]
    pub name: String,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default)]
    pub name: String,
}

/// Delete category options
///
/// Without a transfer target, products of the deleted category lose their
/// category reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDelete {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to_category_id: Option<i64>,
}

impl CategoryDelete {
    pub fn transfer_to(category_id: i64) -> Self {
        Self {
            transfer_to_category_id: Some(category_id),
        }
    }
}
