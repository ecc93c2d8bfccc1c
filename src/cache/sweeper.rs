//! Periodic eviction task shared by the TTL cache and the rate limiter.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::cache::models::deadline_after;

/// A store whose expired entries can be dropped in one pass.
pub trait Sweep: Send + Sync + 'static {
    /// Label used in log lines.
    const NAME: &'static str;

    /// Removes every expired entry and returns how many were dropped.
    fn purge_expired(&self) -> usize;
}

/// Stop handle for a background sweep.
///
/// The task only holds a weak reference to its store, so it winds down on
/// its own once the store is dropped. Dropping the handle aborts the task.
#[derive(Debug, Default)]
pub struct Sweeper {
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns the sweep loop on the current tokio runtime, replacing any
    /// loop this handle already owns. The first pass runs one `period` from now.
    /// A zero period leaves the store to lazy expiry alone.
    pub fn start<T: Sweep>(&self, target: &Arc<T>, period: Duration) {
        if period.is_zero() {
            tracing::warn!("[{}] Cleanup interval is zero, background sweep disabled", T::NAME);
            self.stop();
            return;
        }

        let target = Arc::downgrade(target);
        let handle = tokio::spawn(sweep_loop(target, period));

        if let Some(previous) = self.task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Halts the loop. Returns `false` if nothing was running.
    pub fn stop(&self) -> bool {
        match self.task.lock().take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        if let Some(handle) = self.task.get_mut().take() {
            handle.abort();
        }
    }
}

#[tracing::instrument(skip(target), level = "trace", name = "SweepLoop")]
async fn sweep_loop<T: Sweep>(target: Weak<T>, period: Duration) {
    let mut ticker = tokio::time::interval_at(deadline_after(Instant::now(), period), period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(store) = target.upgrade() else {
            tracing::debug!("{} dropped, stopping sweep", T::NAME);
            break;
        };

        let removed = store.purge_expired();
        if removed > 0 {
            tracing::info!("[{}] Cleaned up {} expired entries", T::NAME, removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        passes: AtomicUsize,
    }

    impl Sweep for Counting {
        const NAME: &'static str = "Counting";

        fn purge_expired(&self) -> usize {
            self.passes.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_once_per_period() {
        let store = Arc::new(Counting::default());
        let sweeper = Sweeper::default();
        sweeper.start(&store, Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(store.passes.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.passes.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(store.passes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_sweeping() {
        let store = Arc::new(Counting::default());
        let sweeper = Sweeper::default();
        sweeper.start(&store, Duration::from_secs(10));
        assert!(sweeper.is_running());

        assert!(sweeper.stop());
        assert!(!sweeper.stop());
        assert!(!sweeper.is_running());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.passes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_degenerate_periods_do_not_panic() {
        let store = Arc::new(Counting::default());
        let sweeper = Sweeper::default();

        sweeper.start(&store, Duration::ZERO);
        assert!(!sweeper.is_running());

        sweeper.start(&store, Duration::from_secs(u64::MAX));
        tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
        assert!(sweeper.is_running());
        assert_eq!(store.passes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ends_when_store_dropped() {
        let store = Arc::new(Counting::default());
        let sweeper = Sweeper::default();
        sweeper.start(&store, Duration::from_secs(10));

        drop(store);
        tokio::time::sleep(Duration::from_secs(11)).await;
        tokio::task::yield_now().await;

        assert!(!sweeper.is_running());
    }
}
