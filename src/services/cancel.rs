//! Per-request cancellation signal and the work/cancel race.
//!
//! A request is cancelled when either:
//! - the process-level token is cancelled (graceful shutdown), or
//! - the request deadline elapses.
//!
//! Cancellation is cooperative: handlers observe it only at the `race` await point.

use std::fmt;
use std::time::Duration;

use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    Canceled,
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Canceled => write!(f, "request canceled"),
            CancelReason::DeadlineExceeded => write!(f, "request deadline exceeded"),
        }
    }
}

impl std::error::Error for CancelReason {}

#[derive(Debug, Clone)]
pub struct CancelSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CancelSignal {
    pub fn new(token: CancellationToken, deadline: Option<Instant>) -> Self {
        Self { token, deadline }
    }

    /// Child of `parent` that additionally expires after `timeout`.
    /// A timeout past the clock's range means no deadline.
    pub fn child_of(parent: &CancellationToken, timeout: Duration) -> Self {
        Self::new(parent.child_token(), Instant::now().checked_add(timeout))
    }

    /// Resolves once the request is cancelled.
    pub async fn cancelled(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => CancelReason::Canceled,
                    _ = sleep_until(deadline) => CancelReason::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                CancelReason::Canceled
            }
        }
    }
}

/// Race a fixed-duration unit of work against cancellation.
///
/// `Ok(())` means the work finished first. The select is biased toward the
/// cancel branch so an already-cancelled request never reports success.
pub async fn race(signal: &CancelSignal, work: Duration) -> Result<(), CancelReason> {
    tokio::select! {
        biased;
        reason = signal.cancelled() => Err(reason),
        _ = sleep(work) => Ok(()),
    }
}
