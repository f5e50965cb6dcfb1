//! Trailing-edge debounce for search-as-you-type.
//!
//! Library hook for interactive front ends that search on every keystroke.
//! The HTTP routes and `crm_desk` issue one search per request and do not
//! go through it.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Delay between the last keystroke and the search it triggers.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs only the most recently scheduled task, once `delay` has passed
/// without a newer one. Dropping the debouncer cancels the pending task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<CancellationToken>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `task`, superseding anything still waiting. Must be called
    /// from within a tokio runtime.
    pub fn schedule<F, Fut>(&self, task: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => task().await,
            }
        })
    }

    /// Cancels the pending task, if any.
    pub fn cancel(&self) {
        if let Some(token) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn recorder(hits: &Arc<AtomicUsize>, value: usize) -> impl FnOnce() -> std::future::Ready<()> + Send + 'static {
        let hits = Arc::clone(hits);
        move || {
            hits.store(value, Ordering::SeqCst);
            std::future::ready(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_task_runs() {
        let hits = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::default();

        let first = debouncer.schedule(recorder(&hits, 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = debouncer.schedule(recorder(&hits, 2));

        first.await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        second.await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn task_waits_for_the_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::default();

        let handle = debouncer.schedule(recorder(&hits, 7));
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        handle.await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels_pending_task() {
        let hits = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::default();

        let handle = debouncer.schedule(recorder(&hits, 3));
        drop(debouncer);

        handle.await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
