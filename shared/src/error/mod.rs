//! Unified error system for the catalog
//!
//! - [`ErrorCode`]: standardized codes for every failure the API reports
//! - [`AppError`]: error value carrying a code and a human-readable message
//! - [`ErrorBody`]: the `{ "error": "..." }` body every failing endpoint returns
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 6xxx: Catalog errors (products, categories)
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//! use shared::http::StatusCode;
//!
//! let err = AppError::with_message(ErrorCode::CategoryNameExists, "Category 'beauty' already exists");
//! assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, ErrorKind, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
