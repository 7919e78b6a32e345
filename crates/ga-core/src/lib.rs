//! `ga-core` — foundational types for the `rust_gameai` toolkit.
//!
//! This crate is a dependency of every other `ga-*` crate.  It intentionally
//! has no `ga-*` dependencies and a small external footprint (`rand`,
//! `thiserror`, and `serde`/`serde_json` for configuration).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`geo`]         | `Vector2D`                                            |
//! | [`time`]        | `SimTime`, `Tick`, `SimClock`                         |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`regulator`]   | `Regulator` — per-tick rate limiter                   |
//! | [`config`]      | `ToolkitConfig` and its sections                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod regulator;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ArbitrationConfig, DispatchConfig, FuzzyConfig, RegulatorConfig, ToolkitConfig, WorldConfig,
};
pub use error::{CoreError, CoreResult};
pub use geo::Vector2D;
pub use ids::AgentId;
pub use regulator::Regulator;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimTime, Tick};

/// Tolerance used when comparing floating-point quantities for equality.
pub const EPSILON: f64 = 1e-12;
