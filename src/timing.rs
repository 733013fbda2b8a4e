//! Cancellable tick source for sampling loops.
//!
//! The threshold monitor and the data recorder pace themselves through a
//! [`Ticker`] instead of sleeping directly, so a host can cancel a run
//! (Ctrl-C, UI button) or bound it with an overall deadline.
//!
//! - [`SleepTicker`] sleeps in real time, in short slices, checking its
//!   [`CancelToken`] and deadline between slices.
//! - [`ManualTicker`] counts ticks without sleeping.  Used by tests and by
//!   the simulator when running faster than real time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest uninterrupted sleep inside [`SleepTicker::tick`].
const SLICE: Duration = Duration::from_millis(50);

/// Outcome of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The full period elapsed.
    Elapsed,
    /// The run was cancelled or hit its deadline before the period ended.
    Cancelled,
}

/// Something that blocks for one sampling period.
pub trait Ticker {
    fn tick(&mut self, period: Duration) -> Tick;
}

// ───────────────────────────────────────────────────────────────
// CancelToken
// ───────────────────────────────────────────────────────────────

/// Shared cancellation flag.  Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can be reused for the next run.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

// ───────────────────────────────────────────────────────────────
// SleepTicker
// ───────────────────────────────────────────────────────────────

/// Real-time ticker backed by `thread::sleep`.
pub struct SleepTicker {
    token: CancelToken,
    deadline: Option<Instant>,
}

impl SleepTicker {
    pub fn new(token: CancelToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Cancel automatically once `timeout` has passed from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    fn should_stop(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

impl Ticker for SleepTicker {
    fn tick(&mut self, period: Duration) -> Tick {
        let end = Instant::now() + period;
        loop {
            if self.should_stop() {
                return Tick::Cancelled;
            }
            let now = Instant::now();
            if now >= end {
                return Tick::Elapsed;
            }
            thread::sleep((end - now).min(SLICE));
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ManualTicker
// ───────────────────────────────────────────────────────────────

/// Non-blocking ticker that records every requested period.
#[derive(Debug, Default)]
pub struct ManualTicker {
    periods: Vec<Duration>,
    cancel_after: Option<usize>,
    token: Option<CancelToken>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report [`Tick::Cancelled`] once `ticks` ticks have elapsed.
    #[must_use]
    pub fn cancel_after(mut self, ticks: usize) -> Self {
        self.cancel_after = Some(ticks);
        self
    }

    /// Observe an external cancellation flag.
    #[must_use]
    pub fn with_token(mut self, token: CancelToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Number of ticks that elapsed.
    pub fn ticks(&self) -> usize {
        self.periods.len()
    }

    /// Sum of all elapsed periods.
    pub fn total(&self) -> Duration {
        self.periods.iter().sum()
    }
}

impl Ticker for ManualTicker {
    fn tick(&mut self, period: Duration) -> Tick {
        if self.token.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Tick::Cancelled;
        }
        if self.cancel_after.is_some_and(|n| self.periods.len() >= n) {
            return Tick::Cancelled;
        }
        self.periods.push(period);
        Tick::Elapsed
    }
}
