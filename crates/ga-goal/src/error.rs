use ga_fuzzy::FuzzyError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GoalError {
    #[error("fuzzy scoring failed: {0}")]
    Fuzzy(#[from] FuzzyError),

    #[error("no weapon in slot {0}")]
    UnknownWeapon(usize),

    #[error("invalid character bias range [{min}, {max}]")]
    InvalidBias { min: f64, max: f64 },
}

pub type GoalResult<T> = Result<T, GoalError>;
