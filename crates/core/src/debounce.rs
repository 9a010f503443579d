//! Trailing-edge debouncer for deferred recomputation.
//!
//! Each [`Debouncer::schedule`] call cancels whatever was pending and
//! starts a fresh delay. Nothing is queued: only the latest scheduled job
//! ever runs.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default delay before suggestions are recomputed after an edit.
pub const DEFAULT_RECOMMENDATION_DELAY: Duration = Duration::from_millis(800);

/// Runs the most recently scheduled job after a quiet period.
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `job` once `delay` has elapsed without another call to
    /// `schedule` or `cancel`.
    pub fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Drop the pending job, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// Whether a job is waiting or running.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    type Job = std::pin::Pin<Box<dyn Future<Output = ()> + Send>>;

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) -> Job) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |n: usize| {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                sink.lock().unwrap().push(n);
            }) as Job
        };
        (log, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        debouncer.schedule(async move {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_job_survives() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let (log, make) = recorder();

        debouncer.schedule(make(1));
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(make(2));
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(make(3));
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert_eq!(*log.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_restarts_delay() {
        let debouncer = Debouncer::new(Duration::from_millis(800));
        let (log, make) = recorder();

        debouncer.schedule(make(1));
        tokio::time::sleep(Duration::from_millis(700)).await;
        debouncer.schedule(make(2));
        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(log.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*log.lock().unwrap(), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_job() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let (log, make) = recorder();

        debouncer.schedule(make(1));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(log.lock().unwrap().is_empty());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_rounds_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let (log, make) = recorder();

        debouncer.schedule(make(1));
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule(make(2));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }
}
