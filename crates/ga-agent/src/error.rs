use ga_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("agent {0} is already registered")]
    DuplicateId(AgentId),

    #[error("agent id {0} is invalid")]
    InvalidId(AgentId),

    #[error("agent {0} is not checked out")]
    NotCheckedOut(AgentId),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
