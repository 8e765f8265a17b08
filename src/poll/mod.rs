//! Poll-until-ready primitive
//!
//! A [`Poller`] repeatedly runs a retrieval operation until the response is
//! accepted or the caller's [`Context`] ends. A response is accepted when its
//! status code is in the configured set (or no set was configured) and every
//! predicate holds for the result.
//!
//! # Example
//! ```ignore
//! let ctx = Context::with_timeout(Duration::from_secs(600));
//! let cluster = Poller::new()
//!     .interval(Duration::from_secs(10))
//!     .status(200)
//!     .predicate(|r: &Response<Cluster>| r.body().is_some_and(Cluster::is_ready))
//!     .run(&ctx, |_ctx| client.get_cluster("abc"))
//!     .await?;
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use log::debug;
use tokio::time::{Instant, sleep_until};

use crate::error::{PollError, Result};

pub mod context;

pub use context::{Context, DoneReason};

/// Default time between attempts
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Acceptance predicate over the last retrieved result
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Fixed-interval poller, generic over the retrieved result type.
pub struct Poller<T> {
    interval: Duration,
    statuses: BTreeSet<u16>,
    predicates: Vec<Predicate<T>>,
}

impl<T> Default for Poller<T> {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            statuses: BTreeSet::new(),
            predicates: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Poller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poller")
            .field("interval", &self.interval)
            .field("statuses", &self.statuses)
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

impl<T> Poller<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time between attempts. Must be greater than zero.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Add an acceptable status code.
    pub fn status(mut self, code: u16) -> Self {
        self.statuses.insert(code);
        self
    }

    /// Add several acceptable status codes.
    pub fn statuses(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.statuses.extend(codes);
        self
    }

    /// Add a predicate that must hold for the result to be accepted.
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn interval_value(&self) -> Duration {
        self.interval
    }

    pub fn has_statuses(&self) -> bool {
        !self.statuses.is_empty()
    }

    /// Whether a response with `status` and `result` ends the poll.
    ///
    /// An empty status set accepts every status.
    pub fn accepts(&self, status: u16, result: &T) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&status);
        status_ok && self.predicates.iter().all(|p| p(result))
    }

    /// Run `task` until its response is accepted.
    ///
    /// `task` receives a clone of `ctx` for each attempt and is abandoned
    /// mid-flight if the context ends. Errors from `task` are returned
    /// immediately without another attempt.
    ///
    /// When the next attempt would start at or after the deadline, no further
    /// attempt is made: the poller waits out the deadline (or cancellation)
    /// and then reports `DeadlineExceeded`.
    pub async fn run<F, Fut>(&self, ctx: &Context, mut task: F) -> Result<T>
    where
        F: FnMut(Context) -> Fut,
        Fut: Future<Output = Result<(u16, T)>>,
    {
        let deadline = ctx.deadline().ok_or(PollError::MissingDeadline)?;
        if self.interval.is_zero() {
            return Err(PollError::InvalidInterval.into());
        }

        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if let Some(reason) = ctx.done_reason() {
                return Err(ended(reason, attempts, started).into());
            }

            attempts += 1;
            let outcome = tokio::select! {
                biased;
                reason = ctx.done() => return Err(ended(reason, attempts, started).into()),
                outcome = task(ctx.clone()) => outcome,
            };
            let (status, result) = outcome?;

            if self.accepts(status, &result) {
                debug!("Poll accepted on attempt {} with status {}", attempts, status);
                return Ok(result);
            }

            // An interval too large to represent lands past any deadline
            let next = Instant::now().checked_add(self.interval);
            let wake = match next {
                Some(next) if next < deadline => {
                    debug!(
                        "Poll attempt {} not accepted (status {}), retrying in {:?}",
                        attempts, status, self.interval
                    );
                    next
                }
                _ => {
                    debug!(
                        "Poll attempt {} not accepted (status {}), no time left for another",
                        attempts, status
                    );
                    deadline
                }
            };

            tokio::select! {
                biased;
                _ = ctx.token().cancelled() => {
                    return Err(PollError::Cancelled { attempts }.into());
                }
                _ = sleep_until(wake) => {}
            }
        }
    }
}

fn ended(reason: DoneReason, attempts: u32, started: Instant) -> PollError {
    match reason {
        DoneReason::Cancelled => PollError::Cancelled { attempts },
        DoneReason::DeadlineExceeded => PollError::DeadlineExceeded {
            attempts,
            elapsed: started.elapsed(),
        },
    }
}
