//! Shared types for the catalog workspace
//!
//! Wire models, page responses, error codes and the slug normalization used by
//! both the server and the client.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorBody, ErrorCode, ErrorKind};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use models::{
    Category, CategoryCreate, CategoryDelete, CategoryUpdate, CategoryWithCount, Product,
    ProductCreate, ProductUpdate, ProductView,
};
pub use request::PageParams;
pub use response::{CategoryPage, DeletedCategory, DeletedProduct, ProductPage};
