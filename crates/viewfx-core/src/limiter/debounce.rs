//! Trailing-edge debounce backed by the tokio timer.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

struct DebounceState<A> {
    func: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    /// Scheduled invocation, replaced on every call
    pending: Mutex<Option<JoinHandle<()>>>,
}

/// A callback that only runs after `wait` has passed without another call.
///
/// Must be called from within a tokio runtime.
pub struct Debounced<A> {
    inner: Arc<DebounceState<A>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Wrap `func` so that bursts of calls collapse into one trailing call.
pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        inner: Arc::new(DebounceState {
            func: Box::new(func),
            wait,
            pending: Mutex::new(None),
        }),
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancel any scheduled invocation and schedule a new one with `args`
    pub fn call(&self, args: A) {
        let mut pending = self
            .inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let state = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(state.wait).await;
            (state.func)(args);
        }));
    }

    /// Whether an invocation is scheduled and has not run yet
    pub fn is_pending(&self) -> bool {
        self.inner
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}
