//! Owned, cancellable timers for dashboard background work.
//!
//! A `ScheduledTask` wraps a spawned tokio task and aborts it when dropped,
//! so a timer never outlives the dashboard that owns it.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to a background timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Runs `work` once after `delay`.
    pub fn after<F>(name: &'static str, delay: Duration, work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            tracing::debug!(task = name, "Timer fired");
            work.await;
        });
        Self { name, handle }
    }

    /// Runs `work` every `period`, first after one full period.
    ///
    /// Each run completes before the next tick is awaited.
    pub fn every<F, Fut>(name: &'static str, period: Duration, mut work: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tracing::debug!(task = name, "Periodic tick");
                work().await;
            }
        });
        Self { name, handle }
    }

    /// True once a one-shot timer has run or the task was aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::trace!(task = self.name, "Cancelling timer");
            self.handle.abort();
        }
    }
}
