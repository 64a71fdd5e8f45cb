/*
 * Responsibility
 * - Path の `{id}` を u64 として受け取る
 * - 数値でない / 範囲外は 400 (request 単位で中断、process には影響しない)
 */
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonId(pub u64);

fn parse_person_id(raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|_| AppError::bad_request("INVALID_ID", "id must be an unsigned integer"))
}

impl<S> FromRequestParts<S> for PersonId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_ID", "missing id"))?;

        parse_person_id(&raw).map(Self)
    }
}
