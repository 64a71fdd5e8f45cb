//! Ordered interceptor composition around a terminal handler.
//!
//! `compile(h, [a, b, c])` behaves like `a(b(c(h)))`: `a` sees the request
//! first, `c` is closest to the handler. An empty list returns `h` unchanged.

use axum::routing::MethodRouter;

use crate::state::AppState;

/// Wraps a method router with one request-processing stage.
pub type Interceptor = fn(MethodRouter<AppState>, &AppState) -> MethodRouter<AppState>;

pub fn compile(
    handler: MethodRouter<AppState>,
    state: &AppState,
    interceptors: &[Interceptor],
) -> MethodRouter<AppState> {
    // Layers applied later wrap earlier ones, so apply innermost first.
    interceptors
        .iter()
        .rev()
        .fold(handler, |wrapped, interceptor| interceptor(wrapped, state))
}
