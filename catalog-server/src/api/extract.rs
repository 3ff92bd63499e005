//! Request extractors that fail with the `{error}` body

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::{AppError, AppResult, ErrorCode};

/// JSON body extractor whose rejection is an [`AppError`] (400)
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected JSON body");
    AppError::with_message(
        ErrorCode::InvalidFormat,
        format!("Invalid JSON body: {}", rejection.body_text()),
    )
}

/// Parse a numeric path id
pub fn parse_id(raw: &str, message: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::invalid_request(message))
}

/// Parse an optional numeric query value
pub fn parse_optional_id(raw: Option<&str>, message: &str) -> AppResult<Option<i64>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(value) => parse_id(value, message).map(Some),
        None => Ok(None),
    }
}
