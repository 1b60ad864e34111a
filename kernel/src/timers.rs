//! Cancellable one-shot timers keyed by kind.
//!
//! At most one timer per kind is live: arming a kind aborts the task
//! previously armed for it. Dropping the registry aborts everything.
//!
//! Aborting only takes effect at the task's next await point, so a task that
//! already woke up may still run. Tasks armed with [`TimerRegistry::arm_with`]
//! receive an [`ArmingToken`] to check before applying their effect.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// Identifies one arming of a timer kind.
///
/// Stays current until the kind is re-armed or cancelled.
#[derive(Debug, Clone)]
pub struct ArmingToken {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl ArmingToken {
    /// Checks if no newer arming or cancellation of this kind happened.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// One live tokio task per timer kind.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TimerRegistry<K> {
    timers: HashMap<K, JoinHandle<()>>,
    generations: HashMap<K, Arc<AtomicU64>>,
}

impl<K> TimerRegistry<K>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            generations: HashMap::new(),
        }
    }

    /// Runs `task` after `delay`, replacing any timer of the same kind.
    pub fn arm<F>(&mut self, kind: K, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.arm_with(kind, delay, |_| task);
    }

    /// Like [`arm`](Self::arm), but hands the task the token of this arming.
    pub fn arm_with<F, Fut>(&mut self, kind: K, delay: Duration, make_task: F)
    where
        F: FnOnce(ArmingToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = self.advance(kind);
        let task = make_task(token);
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task.await;
        });
        if let Some(previous) = self.timers.insert(kind, handle) {
            previous.abort();
            trace!(?kind, "Timer re-armed");
        }
    }

    /// Cancels the timer of `kind`. Returns whether one was pending.
    pub fn cancel(&mut self, kind: K) -> bool {
        self.advance(kind);
        self.timers.remove(&kind).is_some_and(|handle| {
            let pending = !handle.is_finished();
            handle.abort();
            pending
        })
    }

    /// Checks if a timer of `kind` has not fired yet.
    #[must_use]
    pub fn is_armed(&self, kind: K) -> bool {
        self.timers
            .get(&kind)
            .is_some_and(|handle| !handle.is_finished())
    }

    fn advance(&mut self, kind: K) -> ArmingToken {
        let latest = Arc::clone(self.generations.entry(kind).or_default());
        let generation = latest.fetch_add(1, Ordering::SeqCst) + 1;
        ArmingToken { generation, latest }
    }
}

impl<K> Default for TimerRegistry<K>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for TimerRegistry<K> {
    fn drop(&mut self) {
        for handle in self.timers.values() {
            handle.abort();
        }
    }
}
