use thiserror::Error;

/// Errors raised while locating a runtime or running a program through it
#[derive(Error, Debug)]
pub enum ExecError {
    /// The requested (or auto-detected) runtime is unknown or cannot run here
    #[error("{0}")]
    RuntimeUnavailable(String),

    /// The engine process failed, or the program did not compile
    #[error("{0}")]
    RuntimeError(String),

    /// The program threw while running
    #[error("{0}")]
    ProgramError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ExecResult<T> = Result<T, ExecError>;

/// Coarse classification of an [`ExecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RuntimeUnavailable,
    RuntimeError,
    ProgramError,
    Config,
    Io,
    Serialization,
}

impl ExecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecError::RuntimeUnavailable(_) => ErrorKind::RuntimeUnavailable,
            ExecError::RuntimeError(_) => ErrorKind::RuntimeError,
            ExecError::ProgramError(_) => ErrorKind::ProgramError,
            ExecError::Config(_) => ErrorKind::Config,
            ExecError::Io(_) => ErrorKind::Io,
            ExecError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Message carried by the three runtime-facing kinds
    pub fn message(&self) -> Option<&str> {
        match self {
            ExecError::RuntimeUnavailable(m)
            | ExecError::RuntimeError(m)
            | ExecError::ProgramError(m) => Some(m),
            _ => None,
        }
    }
}
