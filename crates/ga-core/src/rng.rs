//! Seeded randomness for agents and worlds.
//!
//! Every agent draws from its own stream, derived from the world seed and its
//! id, so character biases and regulator dither do not depend on how many
//! other agents exist or in which order they were spawned.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vector2D};

/// Golden-ratio multiplier that spreads adjacent ids across the seed space.
const ID_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Uniform in `[lo, hi)`; `lo` for an empty or NaN range.
fn uniform(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    if !(hi > lo) {
        return lo;
    }
    rng.gen_range(lo..hi)
}

/// `true` with probability `p`.  `p <= 0` or NaN never, `p >= 1` always.
fn bernoulli(rng: &mut SmallRng, p: f64) -> bool {
    if !(p > 0.0) {
        return false;
    }
    p >= 1.0 || rng.gen_bool(p)
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// An agent's private random stream.
#[derive(Debug, Clone)]
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(world_seed: u64, agent: AgentId) -> Self {
        let seed = world_seed ^ u64::from(agent.0).wrapping_mul(ID_SPREAD);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// Uniform `f64` in `[lo, hi)`.  Returns `lo` when the range is empty.
    pub fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        uniform(&mut self.0, lo, hi)
    }

    /// Symmetric noise in `[-amount, amount)`.
    pub fn jitter(&mut self, amount: f64) -> f64 {
        let a = amount.abs();
        uniform(&mut self.0, -a, a)
    }

    pub fn chance(&mut self, p: f64) -> bool {
        bernoulli(&mut self.0, p)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// World-level stream for decisions that belong to no single agent, such as
/// where a new agent appears.
#[derive(Debug, Clone)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    pub fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
        uniform(&mut self.0, lo, hi)
    }

    pub fn chance(&mut self, p: f64) -> bool {
        bernoulli(&mut self.0, p)
    }

    /// A point uniformly inside the axis-aligned box `[min, max)`.
    pub fn point_in(&mut self, min: Vector2D, max: Vector2D) -> Vector2D {
        Vector2D::new(uniform(&mut self.0, min.x, max.x), uniform(&mut self.0, min.y, max.y))
    }
}
