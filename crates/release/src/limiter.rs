//! Bounded concurrency for tracker requests.

use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Caps how many futures run at once.
///
/// Waiters are admitted in FIFO order. A slot is returned as soon as its
/// future finishes, whatever the outcome.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimit {
    semaphore: Arc<Semaphore>,
    capacity: NonZeroUsize,
}

impl ConcurrencyLimit {
    /// Create a limit of `capacity` simultaneous futures.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.get())),
            capacity,
        }
    }

    /// Maximum simultaneous futures.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Futures currently holding a slot.
    pub fn in_flight(&self) -> usize {
        self.capacity
            .get()
            .saturating_sub(self.semaphore.available_permits())
    }

    /// Run `task` once a slot is free.
    pub async fn run<F: Future>(&self, task: F) -> F::Output {
        // The semaphore is never closed, so acquiring only waits.
        let _permit = self.semaphore.acquire().await.ok();
        task.await
    }

    /// Run every task under the limit and wait for all of them to settle.
    ///
    /// Outputs are returned in input order. A failing task does not cancel
    /// the others.
    pub async fn run_all<I, F>(&self, tasks: I) -> Vec<F::Output>
    where
        I: IntoIterator<Item = F>,
        F: Future,
    {
        futures::future::join_all(tasks.into_iter().map(|task| self.run(task))).await
    }
}

impl Default for ConcurrencyLimit {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(fixver_core::DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN))
    }
}
