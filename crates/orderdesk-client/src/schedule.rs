//! # Scheduled Tasks
//!
//! A cancellable "run this after a delay" handle.
//!
//! ```text
//!   after(delay, work)
//!        │
//!        ▼
//!   ┌──────────────┐  cancel()   ┌────────────┐
//!   │ timer task   │ ──────────► │ aborted    │   work never starts
//!   │ sleep(delay) │             └────────────┘
//!   └──────┬───────┘
//!          │ elapsed
//!          ▼
//!   tokio::spawn(work)   ← detached: cancel() after this point is a no-op
//! ```
//!
//! Cancelling only ever stops the timer. Work that already started runs to
//! completion.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to one delayed piece of work.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    timer: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// A handle with nothing scheduled.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Runs `work` on its own task once `delay` has elapsed.
    pub fn after<F>(delay: Duration, work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(work);
        });
        ScheduledTask { timer: Some(timer) }
    }

    /// Returns true while the delay has not elapsed.
    pub fn is_scheduled(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Stops the timer. Idempotent.
    ///
    /// Returns true if the work was still waiting and will now never run.
    pub fn cancel(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                let waiting = !timer.is_finished();
                timer.abort();
                waiting
            }
            None => false,
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
