//! Wake-up signal and cooperative cancellation for the render thread

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Auto-reset event: a successful wait consumes the signal.
#[derive(Debug, Default)]
pub struct Signal {
    raised: Mutex<bool>,
    condvar: Condvar,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal, waking one waiter
    pub fn set(&self) {
        let mut raised = self.raised.lock();
        *raised = true;
        self.condvar.notify_one();
    }

    /// Lower the signal without waiting
    pub fn reset(&self) {
        *self.raised.lock() = false;
    }

    pub fn is_set(&self) -> bool {
        *self.raised.lock()
    }

    /// Block until the signal is raised, then lower it
    pub fn wait(&self) {
        let mut raised = self.raised.lock();
        while !*raised {
            self.condvar.wait(&mut raised);
        }
        *raised = false;
    }

    /// Like [`wait`](Self::wait) but gives up after `timeout`.
    ///
    /// Returns `true` if the signal was consumed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut raised = self.raised.lock();
        while !*raised {
            if self.condvar.wait_until(&mut raised, deadline).timed_out() {
                break;
            }
        }
        std::mem::replace(&mut *raised, false)
    }
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: Mutex<bool>,
    condvar: Condvar,
}

/// Shared cooperative cancellation flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    state: Arc<CancelState>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel and wake every thread blocked in [`wait_timeout`](Self::wait_timeout)
    pub fn cancel(&self) {
        let mut cancelled = self.state.cancelled.lock();
        *cancelled = true;
        self.state.condvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.cancelled.lock()
    }

    /// Sleep for `timeout` unless cancelled first.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.state.cancelled.lock();
        while !*cancelled {
            if self.state.condvar.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}
