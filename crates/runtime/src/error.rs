//! Unified error type surfaced by the runtime API.
//!
//! Wraps failures from the simulation, the progress store and content loading
//! so clients can bubble them up with consistent context.
use thiserror::Error;

use skirmish_core::{CombatError, CommandError, EngineError, ErrorSeverity, StoreError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no character available to start a run")]
    NoCharacter,

    #[error("no stage available to start a run")]
    NoStage,

    #[error("fixed step must be positive and finite, got {0}")]
    InvalidStep(f32),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl RuntimeError {
    /// Severity of the underlying failure. Content failures are fatal since no
    /// run can start without a catalog.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::Command(err) => err.severity(),
            Self::Store(err) => err.severity(),
            Self::Content(_) => ErrorSeverity::Fatal,
            Self::NoCharacter | Self::NoStage | Self::InvalidStep(_) => ErrorSeverity::Validation,
        }
    }
}
