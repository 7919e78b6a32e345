use ga_agent::RegistryError;
use ga_core::CoreError;
use ga_fsm::FsmError;
use ga_fuzzy::FuzzyError;
use ga_goal::GoalError;
use ga_message::MessageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("agent registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("dispatcher error: {0}")]
    Message(#[from] MessageError),

    #[error("state machine error: {0}")]
    Fsm(#[from] FsmError),

    #[error("fuzzy logic error: {0}")]
    Fuzzy(#[from] FuzzyError),

    #[error("goal error: {0}")]
    Goal(#[from] GoalError),
}

pub type SimResult<T> = Result<T, SimError>;
