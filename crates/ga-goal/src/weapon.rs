//! Fuzzy weapon desirability and the selector built on it.
//!
//! Every weapon profile owns a fuzzy module with three variables:
//!
//! | Variable       | Sets                                                    |
//! |----------------|---------------------------------------------------------|
//! | `DistToTarget` | Close LS(0,25,150), Medium Tri(25,150,300), Far RS(150,300,1000) |
//! | `AmmoStatus`   | Loads RS(10,30,100), Okay Tri(0,10,30), Low Tri(0,0,10) |
//! | `Desirability` | Undesirable LS(0,25,50), Desirable Tri(25,50,75), VeryDesirable RS(50,75,100) |
//!
//! and one rule per (distance, ammo) pair taken from a [`WeaponRules`]
//! table.

use ga_fuzzy::{DefuzzifyMethod, FuzzyModule, FuzzyTerm, SetId};
use tracing::debug;

use crate::{GoalError, GoalResult, best_score};

pub const DIST_TO_TARGET: &str = "DistToTarget";
pub const AMMO_STATUS: &str = "AmmoStatus";
pub const DESIRABILITY: &str = "Desirability";

/// Consequent of one weapon rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Undesirable,
    Desirable,
    VeryDesirable,
}

/// Rating for every (distance band, ammo band) pair.
///
/// Rows are Close, Medium, Far; columns are Loads, Okay, Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponRules(pub [[Rating; 3]; 3]);

impl WeaponRules {
    /// Long-range weapon: useless up close, best at medium range.
    pub fn rocket_launcher() -> Self {
        use Rating::*;
        WeaponRules([
            [Undesirable, Undesirable, Undesirable],
            [VeryDesirable, VeryDesirable, Desirable],
            [Desirable, Undesirable, Undesirable],
        ])
    }

    /// Close-quarters weapon.
    pub fn shotgun() -> Self {
        use Rating::*;
        WeaponRules([
            [VeryDesirable, VeryDesirable, VeryDesirable],
            [VeryDesirable, Desirable, Undesirable],
            [Undesirable, Undesirable, Undesirable],
        ])
    }

    /// Precision weapon: better the further away the target is.
    pub fn railgun() -> Self {
        use Rating::*;
        WeaponRules([
            [Desirable, Undesirable, Undesirable],
            [Desirable, Desirable, Undesirable],
            [VeryDesirable, VeryDesirable, VeryDesirable],
        ])
    }
}

impl Default for WeaponRules {
    fn default() -> Self {
        Self::rocket_launcher()
    }
}

/// One weapon type's desirability model.
#[derive(Debug, Clone)]
pub struct WeaponProfile {
    name: String,
    fuzzy: FuzzyModule,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, rules: WeaponRules) -> GoalResult<Self> {
        let mut fm = FuzzyModule::new();

        let dist = fm.create_variable(DIST_TO_TARGET)?;
        let close = dist.add_left_shoulder("Target_Close", 0.0, 25.0, 150.0)?;
        let medium = dist.add_triangle("Target_Medium", 25.0, 150.0, 300.0)?;
        let far = dist.add_right_shoulder("Target_Far", 150.0, 300.0, 1000.0)?;

        let ammo = fm.create_variable(AMMO_STATUS)?;
        let loads = ammo.add_right_shoulder("Ammo_Loads", 10.0, 30.0, 100.0)?;
        let okay = ammo.add_triangle("Ammo_Okay", 0.0, 10.0, 30.0)?;
        let low = ammo.add_triangle("Ammo_Low", 0.0, 0.0, 10.0)?;

        let want = fm.create_variable(DESIRABILITY)?;
        let undesirable = want.add_left_shoulder("Undesirable", 0.0, 25.0, 50.0)?;
        let desirable = want.add_triangle("Desirable", 25.0, 50.0, 75.0)?;
        let very = want.add_right_shoulder("VeryDesirable", 50.0, 75.0, 100.0)?;

        let rating = |r: Rating| -> SetId {
            match r {
                Rating::Undesirable => undesirable,
                Rating::Desirable => desirable,
                Rating::VeryDesirable => very,
            }
        };
        for (row, band) in [close, medium, far].into_iter().enumerate() {
            for (col, level) in [loads, okay, low].into_iter().enumerate() {
                fm.add_rule(FuzzyTerm::and([band, level]), rating(rules.0[row][col]))?;
            }
        }

        Ok(Self { name: name.into(), fuzzy: fm })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fuzzy(&self) -> &FuzzyModule {
        &self.fuzzy
    }

    /// Desirability in `[0, 100]` of using this weapon at `distance` with
    /// `ammo` rounds left.  Inputs are clamped into the variables' ranges.
    pub fn desirability(&mut self, distance: f64, ammo: u32) -> GoalResult<f64> {
        self.fuzzy.fuzzify(DIST_TO_TARGET, distance.clamp(0.0, 1000.0))?;
        self.fuzzy.fuzzify(AMMO_STATUS, f64::from(ammo.min(100)))?;
        Ok(self.fuzzy.defuzzify(DESIRABILITY, DefuzzifyMethod::MaxAv)?)
    }
}

/// A weapon an agent carries.
#[derive(Debug, Clone)]
pub struct WeaponSlot {
    pub profile: WeaponProfile,
    /// Rounds left; `None` is unlimited.
    pub ammo: Option<u32>,
    /// Damage per shot, used by callers when the weapon fires.
    pub damage: u32,
    /// Flight time of a shot per unit of distance, in seconds.
    pub secs_per_unit: f64,
}

impl WeaponSlot {
    pub fn has_ammo(&self) -> bool {
        self.ammo != Some(0)
    }

    /// Use one round.  Returns `false` if the weapon is empty.
    pub fn consume(&mut self) -> bool {
        match &mut self.ammo {
            None => true,
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }
}

/// Picks the most desirable weapon for the current target distance.
#[derive(Debug, Clone, Default)]
pub struct WeaponSelector {
    slots: Vec<WeaponSlot>,
    current: Option<usize>,
}

impl WeaponSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot and return its index.  The first slot becomes current.
    pub fn add(&mut self, slot: WeaponSlot) -> usize {
        self.slots.push(slot);
        let index = self.slots.len() - 1;
        self.current.get_or_insert(index);
        index
    }

    pub fn slots(&self) -> &[WeaponSlot] {
        &self.slots
    }

    pub fn slot_mut(&mut self, index: usize) -> GoalResult<&mut WeaponSlot> {
        self.slots.get_mut(index).ok_or(GoalError::UnknownWeapon(index))
    }

    pub fn current(&self) -> Option<&WeaponSlot> {
        self.current.and_then(|i| self.slots.get(i))
    }

    pub fn current_mut(&mut self) -> Option<&mut WeaponSlot> {
        self.current.and_then(|i| self.slots.get_mut(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Desirability of every slot at `distance`; empty weapons score 0.
    pub fn scores(&mut self, distance: f64) -> GoalResult<Vec<f64>> {
        self.slots
            .iter_mut()
            .map(|slot| {
                if !slot.has_ammo() {
                    return Ok(0.0);
                }
                slot.profile.desirability(distance, slot.ammo.unwrap_or(100))
            })
            .collect()
    }

    /// Switch to the most desirable weapon.  Keeps the current one when no
    /// weapon scores above zero.
    pub fn select(&mut self, distance: f64) -> GoalResult<Option<usize>> {
        let scores = self.scores(distance)?;
        if let Some((index, score)) = best_score(scores) {
            if self.current != Some(index) {
                debug!(weapon = self.slots[index].profile.name(), score, distance, "weapon change");
            }
            self.current = Some(index);
        }
        Ok(self.current)
    }
}
