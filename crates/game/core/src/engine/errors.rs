//! Error types for the run lifecycle and command handling.

use crate::env::{DefinitionError, StoreError};
use crate::error::{CombatError, ErrorSeverity};
use crate::skill::AcquireError;
use crate::ultimate::UltimateError;

/// Errors surfaced by [`Simulation`](super::Simulation) lifecycle calls.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no run in progress")]
    NoActiveRun,

    #[error("a run is already in progress")]
    RunInProgress,

    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("unknown stage '{0}'")]
    UnknownStage(String),

    #[error("starting skill '{skill}' of '{character}' is not defined")]
    UnknownStartingSkill { character: String, skill: String },

    #[error("starting skill rejected: {0}")]
    StartingSkill(#[source] AcquireError),

    #[error("invalid tick delta {0}")]
    InvalidDelta(f32),

    #[error("progress store failed: {0}")]
    Store(#[from] StoreError),
}

impl CombatError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Store(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveRun => "ENGINE_NO_ACTIVE_RUN",
            Self::RunInProgress => "ENGINE_RUN_IN_PROGRESS",
            Self::UnknownCharacter(_) => "ENGINE_UNKNOWN_CHARACTER",
            Self::UnknownStage(_) => "ENGINE_UNKNOWN_STAGE",
            Self::UnknownStartingSkill { .. } => "ENGINE_UNKNOWN_STARTING_SKILL",
            Self::StartingSkill(_) => "ENGINE_STARTING_SKILL",
            Self::InvalidDelta(_) => "ENGINE_INVALID_DELTA",
            Self::Store(err) => err.error_code(),
        }
    }
}

/// Errors returned by [`Simulation::handle`](super::Simulation::handle).
///
/// A failed command leaves the simulation unchanged.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("no run in progress")]
    NoActiveRun,

    #[error("the run has already finished")]
    RunFinished,

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),

    #[error("skill index {index} out of range ({count} skills held)")]
    InvalidSkillIndex { index: usize, count: usize },

    #[error("movement vector must be finite")]
    InvalidMovement,

    #[error(transparent)]
    Ultimate(#[from] UltimateError),

    #[error("invalid modifier: {0}")]
    InvalidModifier(#[from] DefinitionError),
}

impl CombatError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ultimate(err) => err.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoActiveRun => "COMMAND_NO_ACTIVE_RUN",
            Self::RunFinished => "COMMAND_RUN_FINISHED",
            Self::UnknownSkill(_) => "COMMAND_UNKNOWN_SKILL",
            Self::InvalidSkillIndex { .. } => "COMMAND_INVALID_SKILL_INDEX",
            Self::InvalidMovement => "COMMAND_INVALID_MOVEMENT",
            Self::Ultimate(err) => err.error_code(),
            Self::InvalidModifier(_) => "COMMAND_INVALID_MODIFIER",
        }
    }
}
