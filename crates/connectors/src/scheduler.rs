//! Fixed-interval scheduler
//!
//! Fires a job every `interval`, starting immediately. Each firing runs in
//! its own tokio task so a slow cycle never delays the next tick. Whether a
//! tick may start while an earlier run is still in flight is decided by the
//! `OverlapPolicy`.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use stargaze_config::OverlapPolicy;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Runs a job on a fixed interval
pub struct IntervalScheduler {
    interval: Duration,
    overlap: OverlapPolicy,
    /// Set while a run is in flight (only consulted under `Skip`)
    running: Arc<AtomicBool>,
    skipped: AtomicU64,
}

impl IntervalScheduler {
    /// Create a scheduler
    pub fn new(interval: Duration, overlap: OverlapPolicy) -> Self {
        Self {
            interval,
            overlap,
            running: Arc::new(AtomicBool::new(false)),
            skipped: AtomicU64::new(0),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks skipped because a run was still in flight
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    /// Run the scheduler loop
    ///
    /// The first tick fires immediately. Never returns; stop it by dropping
    /// the future or aborting its task. Runs already spawned keep going.
    pub async fn run<F, Fut>(&self, mut job: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        info!(
            interval = ?self.interval,
            overlap = ?self.overlap,
            "starting interval scheduler"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.fire(&mut job);
        }
    }

    /// Start one run unless the overlap policy forbids it
    fn fire<F, Fut>(&self, job: &mut F) -> Option<JoinHandle<()>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        match self.overlap {
            OverlapPolicy::Allow => Some(tokio::spawn(job())),
            OverlapPolicy::Skip => {
                if !self.try_start() {
                    let skipped = self.skipped.fetch_add(1, Ordering::Relaxed) + 1;
                    warn!(skipped, "skipping tick - previous run still in progress");
                    return None;
                }

                // Clears the flag on completion, panic or abort
                let guard = RunningGuard(Arc::clone(&self.running));
                let run = job();
                Some(tokio::spawn(async move {
                    let _guard = guard;
                    run.await;
                    debug!("run complete");
                }))
            }
        }
    }

    /// Try to start running (returns false if already running)
    fn try_start(&self) -> bool {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Resets the in-flight flag when dropped
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;
