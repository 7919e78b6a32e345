//! `ga-fuzzy` — fuzzy inference for multi-criteria scoring.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`set`]      | `Shape` membership functions, `FuzzySet`                    |
//! | [`variable`] | `FuzzyVariable`, `VarId`, `SetId`, MaxAv / centroid         |
//! | [`term`]     | `FuzzyTerm` — set / AND / OR / Very / Fairly                |
//! | [`module`]   | `FuzzyModule`, `FuzzyRule`, `DefuzzifyMethod`               |
//! | [`error`]    | `FuzzyError`, `FuzzyResult<T>`                              |
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut fm = FuzzyModule::new();
//! let dist = fm.create_variable("Distance")?;
//! let close = dist.add_left_shoulder("Close", 0.0, 25.0, 150.0)?;
//! let far   = dist.add_right_shoulder("Far", 25.0, 150.0, 300.0)?;
//! let want = fm.create_variable("Desirability")?;
//! let low  = want.add_left_shoulder("Low", 0.0, 25.0, 50.0)?;
//! let high = want.add_right_shoulder("High", 50.0, 75.0, 100.0)?;
//! fm.add_rule(close, high)?;
//! fm.add_rule(far, low)?;
//!
//! fm.fuzzify("Distance", 40.0)?;
//! let score = fm.defuzzify("Desirability", DefuzzifyMethod::MaxAv)?;
//! ```

pub mod error;
pub mod module;
pub mod set;
pub mod term;
pub mod variable;


pub use error::{FuzzyError, FuzzyResult};
pub use module::{DefuzzifyMethod, FuzzyModule, FuzzyRule};
pub use set::{FuzzySet, Shape};
pub use term::FuzzyTerm;
pub use variable::{FuzzyVariable, SetId, VarId};
