//! Catalog wire models
//!
//! All models serialize in camelCase, matching the REST API.

pub mod category;
pub mod product;
pub mod serde_helpers;

pub use category::{Category, CategoryCreate, CategoryDelete, CategoryUpdate, CategoryWithCount};
pub use product::{Product, ProductCreate, ProductUpdate, ProductView, UNRESOLVED_CATEGORY};
