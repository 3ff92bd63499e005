//! Cached list pages with optimistic updates
//!
//! A [`CachedList`] owns one page of categories or products, identified by
//! its [`CacheKey`]. The page moves through [`CacheState`]; every transition
//! builds a new state value instead of editing the old one in place.

use async_trait::async_trait;
use shared::models::{CategoryWithCount, ProductCreate, ProductUpdate, ProductView};
use shared::request::PageParams;
use shared::response::{DeletedCategory, DeletedProduct};

use crate::http::ProductListQuery;
use crate::{CatalogClient, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Categories,
    Products,
}

/// Identity of a cached page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub kind: ResourceKind,
    pub page: PageParams,
    pub category_ids: Vec<i64>,
    pub search: Option<String>,
}

impl CacheKey {
    pub fn categories(page: PageParams) -> Self {
        Self {
            kind: ResourceKind::Categories,
            page,
            category_ids: Vec::new(),
            search: None,
        }
    }

    pub fn products(query: &ProductListQuery) -> Self {
        Self {
            kind: ResourceKind::Products,
            page: query.page,
            category_ids: query.category_ids.clone(),
            search: query.search.clone(),
        }
    }

    pub fn product_query(&self) -> ProductListQuery {
        ProductListQuery {
            page: self.page,
            category_ids: self.category_ids.clone(),
            search: self.search.clone(),
        }
    }
}

/// Items that can be addressed by id inside a page
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for CategoryWithCount {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for ProductView {
    fn id(&self) -> i64 {
        self.product.id
    }
}

/// Loaded page: items plus the server's unsliced total
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CacheState<T> {
    #[default]
    Idle,
    Loading,
    Ready(Page<T>),
    /// Server `error` string (or transport error text)
    Failed(String),
}

impl<T: Identified + Clone> CacheState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(page) => &page.items,
            _ => &[],
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::Ready(page) => page.total,
            _ => 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Insert at the head
    ///
    /// An item whose id is already cached replaces the old entry without
    /// changing the total.
    pub fn prepend(&self, item: T) -> Self {
        let Self::Ready(page) = self else {
            return self.clone();
        };
        let id = item.id();
        let existed = page.items.iter().any(|i| i.id() == id);
        let mut items = Vec::with_capacity(page.items.len() + 1);
        items.push(item);
        items.extend(page.items.iter().filter(|i| i.id() != id).cloned());
        let total = if existed { page.total } else { page.total + 1 };
        Self::Ready(Page { items, total })
    }

    /// Swap the entry with `id` for `item`
    ///
    /// Total unchanged. If `item` carries a different id that is already
    /// cached elsewhere, that other entry is dropped so ids stay unique.
    pub fn replace(&self, id: i64, item: T) -> Self {
        let Self::Ready(page) = self else {
            return self.clone();
        };
        if !page.items.iter().any(|i| i.id() == id) {
            return self.clone();
        }
        let new_id = item.id();
        let items = page
            .items
            .iter()
            .filter(|i| new_id == id || i.id() != new_id)
            .map(|i| if i.id() == id { item.clone() } else { i.clone() })
            .collect();
        Self::Ready(Page {
            items,
            total: page.total,
        })
    }

    /// Drop the entry with `id`; the total never goes below zero
    pub fn remove(&self, id: i64) -> Self {
        let Self::Ready(page) = self else {
            return self.clone();
        };
        if !page.items.iter().any(|i| i.id() == id) {
            return self.clone();
        }
        let items = page.items.iter().filter(|i| i.id() != id).cloned().collect();
        Self::Ready(Page {
            items,
            total: page.total.saturating_sub(1),
        })
    }
}

/// Where pages come from
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    async fn fetch_page(&self, key: &CacheKey) -> ClientResult<Page<T>>;
}

#[async_trait]
impl PageSource<CategoryWithCount> for CatalogClient {
    async fn fetch_page(&self, key: &CacheKey) -> ClientResult<Page<CategoryWithCount>> {
        let page = self.list_categories(key.page).await?;
        Ok(Page {
            items: page.categories,
            total: page.total,
        })
    }
}

#[async_trait]
impl PageSource<ProductView> for CatalogClient {
    async fn fetch_page(&self, key: &CacheKey) -> ClientResult<Page<ProductView>> {
        let page = self.list_products(&key.product_query()).await?;
        Ok(Page {
            items: page.products,
            total: page.total,
        })
    }
}

/// One cached page bound to its source
#[derive(Debug)]
pub struct CachedList<T, S = CatalogClient> {
    source: S,
    key: CacheKey,
    state: CacheState<T>,
}

impl<T, S> CachedList<T, S>
where
    T: Identified + Clone + Send,
    S: PageSource<T>,
{
    pub fn new(source: S, key: CacheKey) -> Self {
        Self {
            source,
            key,
            state: CacheState::Idle,
        }
    }

    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn state(&self) -> &CacheState<T> {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        self.state.items()
    }

    pub fn total(&self) -> u64 {
        self.state.total()
    }

    /// Point at another page; the cache is discarded when the key changes
    pub fn set_key(&mut self, key: CacheKey) {
        if key != self.key {
            self.key = key;
            self.state = CacheState::Idle;
        }
    }

    /// Discard the cache and refetch
    pub async fn refresh(&mut self) -> &CacheState<T> {
        self.state = CacheState::Loading;
        self.state = match self.source.fetch_page(&self.key).await {
            Ok(page) => CacheState::Ready(page),
            Err(e) => {
                tracing::warn!(error = %e, kind = ?self.key.kind, "Failed to load page");
                CacheState::Failed(e.to_string())
            }
        };
        &self.state
    }

    pub fn prepend(&mut self, item: T) {
        self.state = self.state.prepend(item);
    }

    pub fn replace(&mut self, id: i64, item: T) {
        self.state = self.state.replace(id, item);
    }

    pub fn remove(&mut self, id: i64) {
        self.state = self.state.remove(id);
    }
}

/// Category list with create / rename / delete
pub type CategoryList = CachedList<CategoryWithCount>;
/// Product list with create / update / delete
pub type ProductList = CachedList<ProductView>;

impl CachedList<CategoryWithCount> {
    pub fn categories(client: CatalogClient, page: PageParams) -> Self {
        Self::new(client, CacheKey::categories(page))
    }

    pub async fn create(&mut self, name: &str) -> ClientResult<CategoryWithCount> {
        let created = self.source.create_category(name).await?;
        self.prepend(created.clone());
        Ok(created)
    }

    pub async fn rename(&mut self, id: i64, name: &str) -> ClientResult<CategoryWithCount> {
        let updated = self.source.update_category(id, name).await?;
        self.replace(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete(
        &mut self,
        id: i64,
        transfer_to: Option<i64>,
    ) -> ClientResult<DeletedCategory> {
        let deleted = self.source.delete_category(id, transfer_to).await?;
        self.remove(id);
        Ok(deleted)
    }
}

impl CachedList<ProductView> {
    pub fn products(client: CatalogClient, query: &ProductListQuery) -> Self {
        Self::new(client, CacheKey::products(query))
    }

    pub async fn create(&mut self, payload: &ProductCreate) -> ClientResult<ProductView> {
        let created = self.source.create_product(payload).await?;
        self.prepend(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, patch: &ProductUpdate) -> ClientResult<ProductView> {
        let updated = self.source.update_product(id, patch).await?;
        self.replace(id, updated.clone());
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> ClientResult<DeletedProduct> {
        let deleted = self.source.delete_product(id).await?;
        self.remove(id);
        Ok(deleted)
    }
}
