//! 统一错误处理
//!
//! 请求级错误统一使用 [`shared::AppError`]，响应体为 `{"error": "..."}`，
//! HTTP 状态码由错误码决定：
//!
//! | 分类 | 状态码 |
//! |------|--------|
//! | Validation / Conflict | 400 |
//! | NotFound | 404 |
//! | Internal | 500 |
//!
//! 存储层错误 [`RepoError`] 在此转换为 `AppError`。

pub use shared::error::{AppError, AppResult, ErrorBody, ErrorCode, ErrorKind};

use crate::db::repository::RepoError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Store operation failed");
                AppError::database(msg)
            }
        }
    }
}
