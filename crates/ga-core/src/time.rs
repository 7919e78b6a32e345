//! Simulation time model.
//!
//! # Design
//!
//! Game ticks are variable-length: each `SimClock::advance(dt)` adds `dt`
//! seconds of simulated time and bumps the integer `Tick` counter.  Message
//! delays and regulator periods are expressed in simulated seconds
//! ([`SimTime`]), never wall-clock time, so runs are reproducible and tests
//! can step time explicitly.

use std::cmp::Ordering;
use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// A point in simulated time, in seconds since the start of the run.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// The time `secs` seconds after `self`.
    #[inline]
    pub fn offset(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Total order over simulated times (`NaN` sorts last).
    #[inline]
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current simulated time and tick count.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimClock {
    /// Simulated seconds since tick 0.
    pub now: SimTime,
    /// Ticks completed so far.
    pub current_tick: Tick,
    /// Length of the most recent tick in seconds.
    pub last_dt: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick of `dt` seconds.
    ///
    /// Negative `dt` is clamped to zero; simulated time never runs backwards.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.now = self.now + dt;
        self.current_tick = self.current_tick.next();
        self.last_dt = dt;
    }

    /// Reset to time zero.  Called between simulation runs.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.now)
    }
}
