//! `Regulator` — gate per-tick logic to a maximum update rate.
//!
//! Expensive decisions (goal arbitration, weapon selection, vision checks)
//! don't need to run every tick.  A regulator answers "is this logic due
//! yet?" from simulated time alone; nothing ever blocks.
//!
//! A small random dither is added to every period so that many agents
//! created on the same tick drift apart instead of all arbitrating on the
//! same frame.

use crate::{AgentRng, SimTime};

#[derive(Clone, Debug)]
pub struct Regulator {
    /// Seconds between updates.  `0` = every call, negative = never.
    period: f64,
    next_update: SimTime,
    dither: f64,
}

impl Regulator {
    /// Regulator allowing `updates_per_sec` updates per simulated second.
    ///
    /// The first call to [`is_ready`](Self::is_ready) succeeds.  Zero means
    /// "always ready"; a negative rate means "never ready".
    pub fn new(updates_per_sec: f64, dither_secs: f64) -> Self {
        let period = if updates_per_sec > 0.0 {
            1.0 / updates_per_sec
        } else if updates_per_sec == 0.0 {
            0.0
        } else {
            -1.0
        };
        Self {
            period,
            next_update: SimTime::ZERO,
            dither: dither_secs.abs(),
        }
    }

    /// Push the first update to a random point within one period from `now`.
    pub fn staggered(mut self, now: SimTime, rng: &mut AgentRng) -> Self {
        if self.period > 0.0 {
            self.next_update = now + rng.in_range(0.0, self.period);
        }
        self
    }

    /// `true` if the gated logic should run at `now`.  On success the next
    /// update is scheduled one (dithered) period later.
    pub fn is_ready(&mut self, now: SimTime, rng: &mut AgentRng) -> bool {
        if self.period == 0.0 {
            return true;
        }
        if self.period < 0.0 {
            return false;
        }
        if now.total_cmp(&self.next_update).is_ge() {
            let jitter = rng.jitter(self.dither);
            self.next_update = now + (self.period + jitter).max(0.0);
            return true;
        }
        false
    }

    /// Seconds between updates (`0` = always, negative = never).
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Simulated time of the next permitted update.
    pub fn next_update(&self) -> SimTime {
        self.next_update
    }
}
