use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("dispatcher configuration error: {0}")]
    Config(String),
}

pub type MessageResult<T> = Result<T, MessageError>;
