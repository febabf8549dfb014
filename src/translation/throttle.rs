/*!
 * Cooperative pacing of outgoing backend calls.
 *
 * The pipeline pauses between batches and, in degraded mode, between single
 * items so that a burst of calls does not trip the backend's rate limiter.
 * Pauses only suspend the current job's task.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::time::Duration;

/// Default pause after a batch, before the next one
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// Default pause after a single-item call in degraded mode
pub const DEFAULT_ITEM_DELAY: Duration = Duration::from_millis(50);

/// Where in the pipeline a pause happens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// After a successful batch call, before the next batch
    BetweenBatches,
    /// After a single-item call, before the next item of the same batch
    BetweenItems,
}

/// Paces the calls of one job
#[async_trait]
pub trait Throttle: Send + Sync + Debug {
    /// Suspend the caller for the pause configured for `pause`
    async fn pause(&self, pause: Pause);
}

/// Source of sleeps for interval-based throttles
#[async_trait]
pub trait Clock: Send + Sync + Debug {
    /// Suspend the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by tokio timers
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Clock that records requested sleeps and returns immediately
#[derive(Debug, Default)]
pub struct ManualClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Create a clock with no recorded sleeps
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Sum of every sleep requested so far
    pub fn elapsed(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}

#[async_trait]
impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

/// Fixed-interval throttle with separate batch and item delays
#[derive(Debug)]
pub struct IntervalThrottle<C: Clock = TokioClock> {
    /// Delay between batches
    batch_delay: Duration,
    /// Delay between items in degraded mode
    item_delay: Duration,
    /// Where the sleeps go
    clock: C,
}

impl IntervalThrottle<TokioClock> {
    /// Create a throttle that sleeps on tokio timers
    pub fn new(batch_delay: Duration, item_delay: Duration) -> Self {
        Self::with_clock(batch_delay, item_delay, TokioClock)
    }
}

impl Default for IntervalThrottle<TokioClock> {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_DELAY, DEFAULT_ITEM_DELAY)
    }
}

impl<C: Clock> IntervalThrottle<C> {
    /// Create a throttle sleeping through `clock`
    pub fn with_clock(batch_delay: Duration, item_delay: Duration, clock: C) -> Self {
        Self {
            batch_delay,
            item_delay,
            clock,
        }
    }

    /// Delay used for `pause`
    pub fn delay_for(&self, pause: Pause) -> Duration {
        match pause {
            Pause::BetweenBatches => self.batch_delay,
            Pause::BetweenItems => self.item_delay,
        }
    }
}

#[async_trait]
impl<C: Clock> Throttle for IntervalThrottle<C> {
    async fn pause(&self, pause: Pause) {
        let delay = self.delay_for(pause);
        if !delay.is_zero() {
            self.clock.sleep(delay).await;
        }
    }
}

/// Throttle that records pauses without waiting
#[derive(Debug, Default)]
pub struct RecordingThrottle {
    pauses: Mutex<Vec<Pause>>,
}

impl RecordingThrottle {
    /// Create a throttle with no recorded pauses
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested so far, in order
    pub fn pauses(&self) -> Vec<Pause> {
        self.pauses.lock().clone()
    }

    /// How many pauses of this kind were requested
    pub fn count(&self, pause: Pause) -> usize {
        self.pauses.lock().iter().filter(|p| **p == pause).count()
    }
}

#[async_trait]
impl Throttle for RecordingThrottle {
    async fn pause(&self, pause: Pause) {
        self.pauses.lock().push(pause);
    }
}
