//! Errors reported by interpreter boundaries

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpreterError {
    /// `run` or `check_parse_error` was called before initialization finished
    #[error("interpreter is not initialized")]
    NotInitialized,

    /// The boundary cannot answer syntax checks
    #[error("interpreter does not support syntax checks")]
    CheckUnsupported,

    /// The syntax check did not finish in time and was killed
    #[error("syntax check timed out after {0:?}")]
    CheckTimedOut(Duration),

    #[error("interpreter program '{program}' not found: {reason}")]
    ProgramNotFound { program: String, reason: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error talking to the interpreter: {0}")]
    Io(#[from] std::io::Error),
}
