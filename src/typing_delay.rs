//! Typing delay: fire once the user has stopped typing
//!
//! Every `schedule` supersedes the previous one. Only the most recently
//! scheduled value fires, after a full quiet period with no further calls.
//! Superseded timers wake up, see a newer generation and exit without firing.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Cancel-and-reschedule timer on the tokio runtime
#[derive(Debug)]
pub struct TypingDelayer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl TypingDelayer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period for `value`
    ///
    /// `on_stopped` runs with the settled value if no other `schedule` or
    /// `cancel` happens within the delay. Must be called inside a tokio
    /// runtime. Returns the generation of this schedule.
    pub fn schedule<F, Fut>(&self, value: String, on_stopped: F) -> u64
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::trace!(generation, "Typing delay superseded");
                return;
            }
            on_stopped(value).await;
        });

        generation
    }

    /// Drop any pending fire
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
