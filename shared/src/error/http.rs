//! HTTP status code mapping for error codes

use super::codes::{ErrorCode, ErrorKind};
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error code
    ///
    /// Uniqueness conflicts are reported as 400, like any other rejected input.
    pub fn http_status(&self) -> StatusCode {
        if self.is_success() {
            return StatusCode::OK;
        }
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::Validation | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
        }
    }
}
