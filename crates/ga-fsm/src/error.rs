use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FsmError {
    #[error("state machine has no current state")]
    NoCurrentState,

    #[error("state machine has no previous state to revert to")]
    NoPreviousState,
}

pub type FsmResult<T> = Result<T, FsmError>;
