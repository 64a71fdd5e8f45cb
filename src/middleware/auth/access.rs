//! Bearer token 検証 interceptor
//!
//! - `Authorization: Bearer <jwt>` を Authenticator で検証する
//! - 失敗時は理由に関係なく 401 (固定 body) を返し、内側の handler は呼ばない
//! - 成功時は request をそのまま内側へ渡す

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::state::AppState;

/// 認証を route layer として掛ける。
///
/// route layer なので、handler が受け付けない method (405) には適用されない。
pub fn require_bearer(router: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    router.route_layer(middleware::from_fn_with_state(
        state.clone(),
        access_middleware,
    ))
}

async fn access_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    match state.auth.authenticate(req.headers()) {
        Ok(claims) => {
            tracing::debug!(person_id = claims.id, "request authenticated");
        }
        Err(err) => {
            // 理由はログにのみ残す
            tracing::warn!(error = %err, "authentication failed");
            return Err(AppError::Unauthorized);
        }
    }

    Ok(next.run(req).await)
}
