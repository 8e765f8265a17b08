//! Deadline and cancellation context for polling

use std::time::Duration;

use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

/// Longest timeout a context honours; larger values are clamped to it.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Why a context ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneReason {
    /// `cancel()` was called on this context or one of its parents
    Cancelled,
    /// The deadline passed
    DeadlineExceeded,
}

/// Cancellation signal plus an optional deadline.
///
/// Cloning shares the same cancellation token, so cancelling a clone cancels
/// the original. Use [`Context::child_with_timeout`] for a scope that can be
/// cancelled on its own.
#[derive(Debug, Clone)]
pub struct Context {
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl Context {
    /// Context with no deadline. Polling refuses to run with it.
    pub fn background() -> Self {
        Self {
            deadline: None,
            token: CancellationToken::new(),
        }
    }

    /// Context that expires `timeout` from now, capped at [`MAX_TIMEOUT`].
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(expiry(timeout))
    }

    /// Context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            token: CancellationToken::new(),
        }
    }

    /// Child context: cancelled with its parent, and expiring at the earlier
    /// of the parent's deadline and `timeout` from now.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let own = expiry(timeout);
        let deadline = match self.deadline {
            Some(parent) if parent < own => parent,
            _ => own,
        };
        Self {
            deadline: Some(deadline),
            token: self.token.child_token(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` without one.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token driving this context, for wiring into signal handlers.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Reason this context has ended, if it has.
    pub fn done_reason(&self) -> Option<DoneReason> {
        if self.token.is_cancelled() {
            return Some(DoneReason::Cancelled);
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => Some(DoneReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> DoneReason {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => DoneReason::Cancelled,
                _ = sleep_until(deadline) => DoneReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                DoneReason::Cancelled
            }
        }
    }
}

fn expiry(timeout: Duration) -> Instant {
    Instant::now() + timeout.min(MAX_TIMEOUT)
}
