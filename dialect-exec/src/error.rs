use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Code cannot be empty")]
    EmptyCode,

    #[error("Compilation failed")]
    Compilation,

    #[error("Execution timed out after {0} seconds")]
    Timeout(u64),

    #[error("Execution failed with exit code {0}")]
    Runtime(i32),

    #[error("Failed to stage source file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyCode => ErrorKind::Validation,
            Error::Compilation => ErrorKind::Compilation,
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Runtime(_) => ErrorKind::Runtime,
            Error::Staging(_) | Error::System(_) | Error::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Closed set of failure classes reported in debug info
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Compilation,
    Timeout,
    Runtime,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Compilation => "CompilationError",
            ErrorKind::Timeout => "TimeoutError",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::Internal => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
