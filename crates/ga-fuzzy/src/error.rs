use thiserror::Error;

use crate::SetId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("no fuzzy variable named {0:?}")]
    UnknownVariable(String),

    #[error("fuzzy variable {0:?} already exists")]
    DuplicateVariable(String),

    #[error("value {value} is outside the range [{min}, {max}] of variable {variable:?}")]
    OutOfRange { variable: String, value: f64, min: f64, max: f64 },

    #[error("term references a set that does not exist: {0:?}")]
    UnknownSet(SetId),

    #[error("AND / OR terms cannot be used as a rule consequent")]
    InvalidConsequent,

    #[error("AND / OR term has no operands")]
    EmptyTerm,

    #[error("set {name:?} needs min <= peak <= max, got ({min}, {peak}, {max})")]
    InvalidShape { name: String, min: f64, peak: f64, max: f64 },

    #[error("centroid defuzzification needs at least one sample")]
    NoSamples,
}

pub type FuzzyResult<T> = Result<T, FuzzyError>;
