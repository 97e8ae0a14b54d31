//! CLI-level errors (wraps library and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Io(_) => crate::exitcode::IOERR,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Tree(e) => match e {
                TreeError::Parse(_)
                | TreeError::Truncated { .. }
                | TreeError::TrailingTokens { .. }
                | TreeError::TooManyTokens { .. } => crate::exitcode::DATAERR,
                TreeError::UnknownNode(_)
                | TreeError::AlreadyAttached(_)
                | TreeError::CycleDetected { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
