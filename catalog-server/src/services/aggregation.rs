//! Category product counts and name resolution

use std::collections::HashMap;
use std::sync::Arc;

use shared::models::{Category, CategoryWithCount, Product, ProductView, UNRESOLVED_CATEGORY};
use shared::AppResult;

use crate::db::repository::{CategoryStore, ProductStore};

/// Count products per referenced category id
///
/// Products without a category reference are not counted anywhere.
pub fn count_by_category<'a>(products: impl IntoIterator<Item = &'a Product>) -> HashMap<i64, u64> {
    let mut counts = HashMap::new();
    for id in products.into_iter().filter_map(|p| p.category_id) {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Attach counts to categories, most products first, ties by id
///
/// Counts for ids with no matching category are dropped.
pub fn rank_categories(
    categories: Vec<Category>,
    counts: &HashMap<i64, u64>,
) -> Vec<CategoryWithCount> {
    let mut ranked: Vec<CategoryWithCount> = categories
        .into_iter()
        .map(|c| {
            let items = counts.get(&c.id).copied().unwrap_or(0);
            CategoryWithCount::new(c, items)
        })
        .collect();
    ranked.sort_by(|a, b| b.items.cmp(&a.items).then(a.id.cmp(&b.id)));
    ranked
}

/// Category id → display name
#[derive(Debug, Clone, Default)]
pub struct CategoryNames(HashMap<i64, String>);

impl CategoryNames {
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        Self(
            categories
                .into_iter()
                .map(|c| (c.id, c.name.clone()))
                .collect(),
        )
    }

    /// Resolve a reference, [`UNRESOLVED_CATEGORY`] when null or dangling
    pub fn resolve(&self, category_id: Option<i64>) -> &str {
        category_id
            .and_then(|id| self.0.get(&id))
            .map(String::as_str)
            .unwrap_or(UNRESOLVED_CATEGORY)
    }

    pub fn view(&self, product: Product) -> ProductView {
        let name = self.resolve(product.category_id).to_string();
        ProductView::new(product, name)
    }
}

/// Read-only aggregation over the two stores
#[derive(Clone)]
pub struct AggregationService {
    categories: Arc<dyn CategoryStore>,
    products: Arc<dyn ProductStore>,
}

impl AggregationService {
    pub fn new(categories: Arc<dyn CategoryStore>, products: Arc<dyn ProductStore>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Product count per category id (absent = 0)
    pub async fn counts(&self) -> AppResult<HashMap<i64, u64>> {
        Ok(self.products.aggregate_count().await?)
    }

    /// Count for a single category
    pub async fn count_for(&self, category_id: i64) -> AppResult<u64> {
        Ok(self.counts().await?.get(&category_id).copied().unwrap_or(0))
    }

    pub async fn names(&self) -> AppResult<CategoryNames> {
        let categories = self.categories.find_all().await?;
        Ok(CategoryNames::from_categories(&categories))
    }

    /// All categories with counts, ranked
    pub async fn ranked_categories(&self) -> AppResult<Vec<CategoryWithCount>> {
        let categories = self.categories.find_all().await?;
        let counts = self.counts().await?;
        Ok(rank_categories(categories, &counts))
    }

    /// Resolve the category name of a single product
    pub async fn view(&self, product: Product) -> AppResult<ProductView> {
        let name = match product.category_id {
            Some(id) => self
                .categories
                .find_by_id(id)
                .await?
                .map(|c| c.name)
                .unwrap_or_else(|| UNRESOLVED_CATEGORY.to_string()),
            None => UNRESOLVED_CATEGORY.to_string(),
        };
        Ok(ProductView::new(product, name))
    }
}
