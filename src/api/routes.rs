/*
 * Responsibility
 * - URL 構造を定義 (`/`, `/{id}`)
 * - method ごとの dispatch と interceptor chain の適用
 * - GET/POST 以外は 405 (認証も store へのアクセスもしない)
 */
use axum::{Router, routing::get};

use crate::api::handlers::people::{create_person, get_person, list_people};
use crate::middleware::{
    auth::require_bearer,
    chain::{Interceptor, compile},
};
use crate::state::AppState;

/// Applied outer-to-inner around every people handler.
const INTERCEPTORS: &[Interceptor] = &[require_bearer];

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            compile(get(list_people).post(create_person), state, INTERCEPTORS),
        )
        .route("/{id}", compile(get(get_person), state, INTERCEPTORS))
}
