//! 服务层 - 目录业务服务
//!
//! # 服务列表
//!
//! - [`AggregationService`] - 分类商品计数与名称解析
//! - [`CategoryLifecycle`] - 分类创建、重命名、删除 (含商品转移)
//! - [`ProductService`] - 商品增删改查
//! - [`ListingService`] - 列表分页
//! - [`HttpService`] - HTTP 服务器
//!
//! All writes share one [`WriteGate`], which serializes uniqueness checks,
//! id allocation and the mutation that follows.

pub mod aggregation;
pub mod category_lifecycle;
pub mod http_service;
pub mod identity;
pub mod listing;
pub mod product_service;

pub use aggregation::AggregationService;
pub use category_lifecycle::CategoryLifecycle;
pub use http_service::HttpService;
pub use identity::{IdGenerator, IdStrategy};
pub use listing::{ListingService, ProductQuery};
pub use product_service::ProductService;

use std::sync::Arc;

/// Catalog-wide write lock
pub type WriteGate = Arc<tokio::sync::Mutex<()>>;
