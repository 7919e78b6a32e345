//! Toolkit configuration.
//!
//! Tuning constants (dedup tolerance, queue bounds, regulator rates,
//! personality bias ranges) are domain tuning rather than algorithm, so
//! they live here instead of being hard-coded in the crates that use them.
//!
//! Typically loaded from a JSON file by the application and handed to the
//! world builder; every field has a default so partial files are accepted.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Message dispatch policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Two delayed telegrams with the same sender, receiver and kind whose
    /// dispatch times differ by less than this are treated as duplicates and
    /// only the first is queued.  `None` disables deduplication.
    ///
    /// Note this can swallow legitimately distinct events that happen close
    /// together (two hits from the same shooter within the window).
    pub dedup_tolerance_secs: Option<f64>,

    /// Maximum number of telegrams waiting in the delay queue.  Also caps
    /// the telegrams parked for busy receivers.
    pub max_pending: usize,

    /// Maximum nesting of immediate deliveries: a handler that sends with
    /// zero delay runs the receiver's handler inside its own, and so on.
    /// A send that would nest deeper is dropped.
    pub max_depth: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            dedup_tolerance_secs: Some(0.25),
            max_pending: 4096,
            max_depth: 32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Sample count for centroid defuzzification.
    pub centroid_samples: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self { centroid_samples: 15 }
    }
}

/// Goal and weapon arbitration tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrationConfig {
    pub goal_updates_per_sec: f64,
    pub weapon_updates_per_sec: f64,
    /// Character biases are drawn uniformly from `[bias_min, bias_max)`.
    pub bias_min: f64,
    pub bias_max: f64,
}

impl Default for ArbitrationConfig {
    fn default() -> Self {
        Self {
            goal_updates_per_sec: 4.0,
            weapon_updates_per_sec: 2.0,
            bias_min: 0.5,
            bias_max: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatorConfig {
    /// Random ± jitter applied to every regulator period, in seconds.
    pub dither_secs: f64,
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self { dither_secs: 0.01 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Nominal tick length in seconds used by `World::run_ticks`.
    pub tick_secs: f64,
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { tick_secs: 1.0 / 60.0, seed: 42 }
    }
}

/// Top-level configuration for every toolkit component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub dispatch: DispatchConfig,
    pub fuzzy: FuzzyConfig,
    pub arbitration: ArbitrationConfig,
    pub regulator: RegulatorConfig,
    pub world: WorldConfig,
}

impl ToolkitConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: ToolkitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the components cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(tol) = self.dispatch.dedup_tolerance_secs {
            if !(tol >= 0.0) {
                return Err(CoreError::Config(format!(
                    "dispatch.dedup_tolerance_secs must be >= 0, got {tol}"
                )));
            }
        }
        if self.dispatch.max_pending == 0 {
            return Err(CoreError::Config("dispatch.max_pending must be > 0".into()));
        }
        if self.dispatch.max_depth == 0 {
            return Err(CoreError::Config("dispatch.max_depth must be > 0".into()));
        }
        if self.fuzzy.centroid_samples == 0 {
            return Err(CoreError::Config("fuzzy.centroid_samples must be > 0".into()));
        }
        if self.arbitration.bias_max < self.arbitration.bias_min {
            return Err(CoreError::Config(format!(
                "arbitration.bias_max ({}) < bias_min ({})",
                self.arbitration.bias_max, self.arbitration.bias_min
            )));
        }
        if !(self.world.tick_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "world.tick_secs must be > 0, got {}",
                self.world.tick_secs
            )));
        }
        Ok(())
    }
}
