//! Response bodies of the list and delete endpoints

use crate::models::serde_helpers::millis_utc;
use crate::models::{Category, CategoryWithCount, ProductView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /categories` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    pub categories: Vec<CategoryWithCount>,
    /// Count before slicing
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// `GET /products` body
///
/// The server emits JSON objects so that `select` can drop fields; clients
/// that do not project read it back as `ProductPage<ProductView>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage<P = ProductView> {
    pub products: Vec<P>,
    /// Count of matching products before slicing
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

/// `DELETE /categories/:id` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedCategory {
    pub id: i64,
    pub name: String,
    pub deleted: bool,
}

impl From<Category> for DeletedCategory {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            deleted: true,
        }
    }
}

/// `DELETE /products/:id` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProduct {
    #[serde(flatten)]
    pub product: ProductView,
    pub is_deleted: bool,
    #[serde(serialize_with = "millis_utc")]
    pub deleted_on: DateTime<Utc>,
}

impl DeletedProduct {
    pub fn new(product: ProductView, deleted_on: DateTime<Utc>) -> Self {
        Self {
            product,
            is_deleted: true,
            deleted_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;

    #[test]
    fn deleted_product_is_flat() {
        let product = Product {
            id: 4,
            title: "Red Lipstick".to_string(),
            thumbnail: String::new(),
            brand: String::new(),
            category_id: None,
            price: 12.99,
            discount_percentage: None,
            rating: 0.0,
            stock: 0,
        };
        let deleted = DeletedProduct::new(ProductView::new(product, ""), Utc::now());
        let json = serde_json::to_value(&deleted).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["isDeleted"], true);
        assert_eq!(json["category"], "");
        let deleted_on = json["deletedOn"].as_str().unwrap();
        assert!(deleted_on.ends_with('Z'));
        let fraction = deleted_on.rsplit('.').next().unwrap();
        assert_eq!(fraction.len(), 4, "{deleted_on}");
    }

    #[test]
    fn deleted_category_marks_deleted() {
        let deleted = DeletedCategory::from(Category {
            id: 2,
            name: "fragrances".to_string(),
        });
        let json = serde_json::to_string(&deleted).unwrap();
        assert_eq!(json, r#"{"id":2,"name":"fragrances","deleted":true}"#);
    }
}
