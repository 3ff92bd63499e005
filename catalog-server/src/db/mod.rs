//! Database Module
//!
//! Embedded SurrealDB (RocksDB) connection and schema bootstrap. The
//! process-local store used by tests and `STORE_BACKEND=memory` lives in
//! [`memory`].

pub mod memory;
pub mod repository;

use std::path::Path;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

pub use memory::MemoryStore;

const NAMESPACE: &str = "catalog";
const DATABASE: &str = "catalog";

/// 表结构定义 (幂等)
const SCHEMA: &str = "
DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS category_name ON TABLE category FIELDS name UNIQUE;
DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
DEFINE INDEX IF NOT EXISTS product_category ON TABLE product FIELDS category_id;
DEFINE TABLE IF NOT EXISTS id_mark SCHEMALESS;
";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `path` and apply the schema
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(path = %path.display(), "Database connection established (SurrealDB RocksDB)");

        db.query(SCHEMA)
            .await
            .and_then(|r| r.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
