use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::{Result, ServerError};
use crate::services::identity::IdStrategy;

/// Which store backs the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Embedded SurrealDB (RocksDB) under `WORK_DIR/database`
    #[default]
    Surreal,
    /// Process-local maps, lost on exit
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surreal" | "surrealdb" => Ok(Self::Surreal),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库位于 WORK_DIR/database) |
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | STORE_BACKEND | surreal | `surreal` 或 `memory` |
/// | ID_STRATEGY | sequence | `sequence` 或 `max-plus-one` |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (无) | 滚动日志文件目录 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/catalog HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 存储后端
    pub store_backend: StoreBackend,
    /// ID 分配策略
    pub id_strategy: IdStrategy,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置或无法解析的变量使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            id_strategy: std::env::var("ID_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 从环境变量加载配置并校验
    ///
    /// 与 [`from_env`](Self::from_env) 不同，已设置但无法解析的变量返回
    /// [`ServerError::Config`]
    pub fn load() -> Result<Self> {
        check_var::<u16>("HTTP_PORT", std::env::var("HTTP_PORT").ok())?;
        check_var::<StoreBackend>("STORE_BACKEND", std::env::var("STORE_BACKEND").ok())?;
        check_var::<IdStrategy>("ID_STRATEGY", std::env::var("ID_STRATEGY").ok())?;
        check_var::<bool>("LOG_JSON", std::env::var("LOG_JSON").ok())?;
        Ok(Self::from_env())
    }

    /// In-memory configuration, 常用于测试场景
    pub fn in_memory() -> Self {
        Self {
            store_backend: StoreBackend::Memory,
            ..Self::from_env()
        }
    }

    /// 使用自定义值覆盖部分配置
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())
    }
}

fn check_var<T>(name: &str, raw: Option<String>) -> Result<()>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .map(|_| ())
            .map_err(|e| ServerError::Config(format!("{name}={value}: {e}"))),
        None => Ok(()),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
