//! Catalog Client - HTTP client for the catalog server
//!
//! Typed calls for every endpoint, cached list pages with optimistic
//! updates, and the pagination / formatting helpers list views need.

pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod pagination;

pub use cache::{CacheKey, CacheState, CachedList, CategoryList, Page, PageSource, ProductList};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{CatalogClient, ProductListQuery};
pub use pagination::{PageItem, Pagination};

// Re-export shared types for convenience
pub use shared::models::{Category, CategoryWithCount, Product, ProductCreate, ProductUpdate, ProductView};
pub use shared::request::PageParams;
