/*
 * Responsibility
 * - middleware::cancel が extensions に入れた CancelSignal を handler に渡す
 * - 見つからない場合は layer の配線ミスなので 500
 */
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;
use crate::services::cancel::CancelSignal;

impl<S> FromRequestParts<S> for CancelSignal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CancelSignal>().cloned().ok_or_else(|| {
            tracing::error!("cancel signal missing from request extensions");
            AppError::Internal
        })
    }
}
