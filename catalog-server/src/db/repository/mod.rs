//! Repository Module
//!
//! Store interfaces the catalog services are written against, plus their
//! SurrealDB implementations. The in-memory implementation lives in
//! [`crate::db::memory`].

pub mod category;
pub mod product;

pub use category::CategoryRepository;
pub use product::ProductRepository;

use std::collections::HashMap;

use async_trait::async_trait;
use shared::models::{Category, Product, ProductUpdate};
use shared::request::PageParams;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Product selection criteria
///
/// An empty `category_ids` means "any category"; `search` is matched
/// case-insensitively against title and brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category_ids: Vec<i64>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// Lowercased, trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Evaluate the filter in process
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category_ids.is_empty()
            && !product
                .category_id
                .is_some_and(|id| self.category_ids.contains(&id))
        {
            return false;
        }
        match self.search_term() {
            Some(q) => {
                product.title.to_lowercase().contains(&q)
                    || product.brand.to_lowercase().contains(&q)
            }
            None => true,
        }
    }
}

/// Category collection
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by id
    async fn find_all(&self) -> RepoResult<Vec<Category>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Category>>;
    /// Exact match on the stored name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>>;
    async fn insert(&self, category: Category) -> RepoResult<Category>;
    /// Rename; `None` when the id does not exist
    async fn update_one(&self, id: i64, name: &str) -> RepoResult<Option<Category>>;
    /// Delete a category and point its products at `transfer_to` (or at no
    /// category) in one atomic step.
    ///
    /// Returns the deleted category and the number of products moved, or
    /// `None` when the id does not exist.
    async fn delete_one(
        &self,
        id: i64,
        transfer_to: Option<i64>,
    ) -> RepoResult<Option<(Category, u64)>>;
    /// Largest id ever stored, including deleted ones (0 when empty)
    async fn high_water_mark(&self) -> RepoResult<i64>;
}

/// Product collection
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Product>>;
    /// Matching products ordered by id, restricted to `page`
    async fn find_many(&self, filter: &ProductFilter, page: PageParams)
    -> RepoResult<Vec<Product>>;
    /// Number of matching products
    async fn count(&self, filter: &ProductFilter) -> RepoResult<u64>;
    async fn insert(&self, product: Product) -> RepoResult<Product>;
    /// Apply a partial update; `None` when the id does not exist
    async fn update_one(&self, id: i64, patch: &ProductUpdate) -> RepoResult<Option<Product>>;
    /// Delete and return the removed product
    async fn delete_one(&self, id: i64) -> RepoResult<Option<Product>>;
    /// Product count per referenced category id (null references excluded)
    async fn aggregate_count(&self) -> RepoResult<HashMap<i64, u64>>;
    /// Largest id ever stored, including deleted ones (0 when empty)
    async fn high_water_mark(&self) -> RepoResult<i64>;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Table holding one high-water-mark record per collection
pub(crate) const ID_MARK_TABLE: &str = "id_mark";
