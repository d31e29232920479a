//! CLI failures and the process exit code each one maps to.
//!
//! | code | cause |
//! |---|---|
//! | 0  | success |
//! | 2  | argument parsing (clap exits before `run`) |
//! | 10 | engine: bad dimensions, rejected settings, non-finite state, nothing saved |
//! | 11 | file I/O: PNG, snapshot or scene |
//! | 12 | user input: `--params`, `--background`, malformed scene or snapshot |
//! | 13 | serializing the report or snapshot |

use particle_field_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Engine(_) => 10,
            Self::Io(_) => 11,
            Self::Input(_) => 12,
            Self::Serialization(_) => 13,
        }
    }
}

impl From<EngineError> for CliError {
    /// PNG write failures surface from the engine crates as `EngineError::Io`
    /// and keep the I/O exit code.
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => Self::Io(msg),
            other => Self::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
