//! Attaches a `CancelSignal` to every request.
//!
//! The signal is a child of the shutdown token and carries the request
//! deadline, so a handler racing on it is cancelled by whichever comes first.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::cancel::CancelSignal;
use crate::state::AppState;

pub fn apply(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(
        state.clone(),
        attach_cancel_signal,
    ))
}

async fn attach_cancel_signal(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let signal = CancelSignal::child_of(&state.shutdown, state.request_timeout);
    req.extensions_mut().insert(signal);

    next.run(req).await
}
