use thiserror::Error;

/// Errors a session can report when accepting a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session closed")]
    Closed,

    #[error("Session rejected request: {0}")]
    Rejected(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
