//! In-memory store
//!
//! Both collections behind one lock, so a category delete and the product
//! reassignment it triggers are observed together.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{Category, Product, ProductUpdate};
use shared::request::PageParams;

use super::repository::{CategoryStore, ProductFilter, ProductStore, RepoError, RepoResult};

#[derive(Debug, Default)]
struct Inner {
    categories: BTreeMap<i64, Category>,
    products: BTreeMap<i64, Product>,
    category_mark: i64,
    product_mark: i64,
}

/// Process-local catalog store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given rows
    pub fn seeded(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for category in categories {
                inner.category_mark = inner.category_mark.max(category.id);
                inner.categories.insert(category.id, category);
            }
            for product in products {
                inner.product_mark = inner.product_mark.max(product.id);
                inner.products.insert(product.id, product);
            }
        }
        store
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Category>> {
        Ok(self.inner.read().categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>> {
        Ok(self.inner.read().categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        Ok(self
            .inner
            .read()
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn insert(&self, category: Category) -> RepoResult<Category> {
        let mut inner = self.inner.write();
        if inner.categories.contains_key(&category.id) {
            return Err(RepoError::Duplicate(format!(
                "Category {} already exists",
                category.id
            )));
        }
        inner.category_mark = inner.category_mark.max(category.id);
        inner.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_one(&self, id: i64, name: &str) -> RepoResult<Option<Category>> {
        let mut inner = self.inner.write();
        Ok(inner.categories.get_mut(&id).map(|c| {
            c.name = name.to_string();
            c.clone()
        }))
    }

    async fn delete_one(
        &self,
        id: i64,
        transfer_to: Option<i64>,
    ) -> RepoResult<Option<(Category, u64)>> {
        let mut inner = self.inner.write();
        let Some(category) = inner.categories.remove(&id) else {
            return Ok(None);
        };
        let mut moved = 0;
        for product in inner.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = transfer_to;
                moved += 1;
            }
        }
        Ok(Some((category, moved)))
    }

    async fn high_water_mark(&self) -> RepoResult<i64> {
        Ok(self.inner.read().category_mark)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>> {
        Ok(self.inner.read().products.get(&id).cloned())
    }

    async fn find_many(
        &self,
        filter: &ProductFilter,
        page: PageParams,
    ) -> RepoResult<Vec<Product>> {
        let inner = self.inner.read();
        let matching: Vec<&Product> = inner
            .products
            .values()
            .filter(|p| filter.matches(p))
            .collect();
        let window = page.window(matching.len());
        Ok(matching[window].iter().map(|p| (*p).clone()).collect())
    }

    async fn count(&self, filter: &ProductFilter) -> RepoResult<u64> {
        Ok(self
            .inner
            .read()
            .products
            .values()
            .filter(|p| filter.matches(p))
            .count() as u64)
    }

    async fn insert(&self, product: Product) -> RepoResult<Product> {
        let mut inner = self.inner.write();
        if inner.products.contains_key(&product.id) {
            return Err(RepoError::Duplicate(format!(
                "Product {} already exists",
                product.id
            )));
        }
        inner.product_mark = inner.product_mark.max(product.id);
        inner.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_one(&self, id: i64, patch: &ProductUpdate) -> RepoResult<Option<Product>> {
        let mut inner = self.inner.write();
        Ok(inner.products.get_mut(&id).map(|p| {
            patch.apply_to(p);
            p.clone()
        }))
    }

    async fn delete_one(&self, id: i64) -> RepoResult<Option<Product>> {
        Ok(self.inner.write().products.remove(&id))
    }

    async fn aggregate_count(&self) -> RepoResult<HashMap<i64, u64>> {
        let inner = self.inner.read();
        Ok(crate::services::aggregation::count_by_category(
            inner.products.values(),
        ))
    }

    async fn high_water_mark(&self) -> RepoResult<i64> {
        Ok(self.inner.read().product_mark)
    }
}
