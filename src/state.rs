/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - people store, authenticator, token issuer, hasher, cancel 設定
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::repos::PersonRepo;
use crate::services::{
    auth::{Authenticator, TokenIssuer},
    password::CredentialHasher,
};

#[derive(Clone)]
pub struct AppState {
    pub people: PersonRepo,
    pub auth: Arc<dyn Authenticator>,
    pub tokens: Arc<TokenIssuer>,
    pub hasher: Arc<dyn CredentialHasher>,

    /// Length of the simulated unit of work each GET/POST performs.
    pub simulated_work: Duration,
    /// Per-request deadline; elapsing cancels the request.
    pub request_timeout: Duration,
    /// Cancelled on shutdown; every request signal is a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        people: PersonRepo,
        auth: Arc<dyn Authenticator>,
        tokens: Arc<TokenIssuer>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            people,
            auth,
            tokens,
            hasher,
            simulated_work: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_timings(mut self, simulated_work: Duration, request_timeout: Duration) -> Self {
        self.simulated_work = simulated_work;
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}
