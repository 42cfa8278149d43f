//! Leading-edge throttle.
//!
//! The cooldown is tracked as a deadline rather than a timer task, so a
//! throttled callback works with or without a running runtime.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

struct ThrottleState<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    limit: Duration,
    /// End of the current cooldown window, if any
    cooling_until: Mutex<Option<Instant>>,
}

/// A callback that runs at most once per `limit` window.
pub struct Throttled<A> {
    inner: Arc<ThrottleState<A>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Wrap `func` so it runs on the first call of an idle period and ignores
/// calls until `limit` has elapsed.
pub fn throttle<A, F>(func: F, limit: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        inner: Arc::new(ThrottleState {
            func: Box::new(func),
            limit,
            cooling_until: Mutex::new(None),
        }),
    }
}

impl<A> Throttled<A> {
    /// Invoke the callback unless cooling down.
    ///
    /// Returns `true` when the callback ran, `false` when the call was dropped.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut cooling_until = self
                .inner
                .cooling_until
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if matches!(*cooling_until, Some(deadline) if now < deadline) {
                return false;
            }
            *cooling_until = Some(now + self.inner.limit);
        }

        (self.inner.func)(args);
        true
    }

    /// Whether a call made now would be dropped
    pub fn is_cooling_down(&self) -> bool {
        let now = Instant::now();
        self.inner
            .cooling_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some_and(|deadline| now < deadline)
    }

    pub fn limit(&self) -> Duration {
        self.inner.limit
    }
}
