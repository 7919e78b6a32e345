//! `ga-goal` — utility-based decision making.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`evaluator`] | `Evaluator<A>`, `FnEvaluator`, `Arbitrator`, `best_score`  |
//! | [`goal`]      | `GoalStatus`, `Goal<A, M>`, `GoalStack`                    |
//! | [`weapon`]    | `WeaponProfile`, `WeaponRules`, `WeaponSlot`, `WeaponSelector` |
//! | [`feature`]   | normalised health / distance / weapon strength inputs      |
//! | [`error`]     | `GoalError`, `GoalResult<T>`                               |
//!
//! # Arbitration
//!
//! Each evaluator scores `desirability × character_bias`.  The strictly
//! highest score above zero wins (first one on ties) and its `set_goal`
//! runs; if nothing scores above zero the round is a logged no-op.  Callers
//! gate arbitration with a [`ga_core::Regulator`] rather than running it
//! every tick.

pub mod error;
pub mod evaluator;
pub mod feature;
pub mod goal;
pub mod weapon;


pub use error::{GoalError, GoalResult};
pub use evaluator::{Arbitrator, Choice, Evaluator, FnEvaluator, best_score, random_bias};
pub use goal::{Goal, GoalStack, GoalStatus};
pub use weapon::{Rating, WeaponProfile, WeaponRules, WeaponSelector, WeaponSlot};
