use std::sync::Arc;

use crate::core::{Config, Result, ServerError, StoreBackend};
use crate::db::repository::{CategoryRepository, CategoryStore, ProductRepository, ProductStore};
use crate::db::{DbService, MemoryStore};
use crate::services::{
    AggregationService, CategoryLifecycle, IdGenerator, ListingService, ProductService, WriteGate,
};

/// 服务器状态 - 持有所有服务的单例引用
///
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | categories | Arc<CategoryLifecycle> | 分类写操作 |
/// | products | Arc<ProductService> | 商品增删改查 |
/// | listing | Arc<ListingService> | 列表分页 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    pub categories: Arc<CategoryLifecycle>,
    pub products: Arc<ProductService>,
    pub listing: Arc<ListingService>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按 `config.store_backend` 打开存储并组装服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        match config.store_backend {
            StoreBackend::Surreal => {
                config.ensure_work_dir_structure()?;
                let db = DbService::open(config.database_dir())
                    .await
                    .map_err(|e| ServerError::Database(e.message))?;
                Ok(Self::with_stores(
                    config.clone(),
                    Arc::new(CategoryRepository::new(db.db.clone())),
                    Arc::new(ProductRepository::new(db.db)),
                ))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data is lost on exit");
                Ok(Self::in_memory(config.clone(), MemoryStore::new()))
            }
        }
    }

    /// 基于内存存储构造 (测试常用)
    pub fn in_memory(config: Config, store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self::with_stores(config, store.clone(), store)
    }

    /// Wire services over the given stores
    pub fn with_stores(
        config: Config,
        categories: Arc<dyn CategoryStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        let gate = WriteGate::default();
        let aggregation = AggregationService::new(categories.clone(), products.clone());

        let lifecycle = CategoryLifecycle::new(
            categories.clone(),
            aggregation.clone(),
            IdGenerator::new(config.id_strategy),
            gate.clone(),
        );
        let product_service = ProductService::new(
            products.clone(),
            categories,
            aggregation.clone(),
            IdGenerator::new(config.id_strategy),
            gate,
        );
        let listing = ListingService::new(products, aggregation);

        Self {
            config,
            categories: Arc::new(lifecycle),
            products: Arc::new(product_service),
            listing: Arc::new(listing),
        }
    }
}
