use crate::error::{CombatError, ErrorSeverity};

/// Reasons a skill acquisition is refused. The loadout is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AcquireError {
    #[error("'{skill}' is unique and already held")]
    AlreadyHeld { skill: String },

    #[error("'{skill}' requires level {required}, current level is {level}")]
    LevelTooLow {
        skill: String,
        required: u32,
        level: u32,
    },

    #[error("'{skill}' requires '{missing}'")]
    MissingRequirement { skill: String, missing: String },

    #[error("ultimate '{skill}' has no ultimate parameters")]
    MissingUltimateParams { skill: String },

    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
}

impl CombatError for AcquireError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyHeld { .. } | Self::LevelTooLow { .. } | Self::MissingRequirement { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::MissingUltimateParams { .. } | Self::UnknownSkill(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyHeld { .. } => "ACQUIRE_ALREADY_HELD",
            Self::LevelTooLow { .. } => "ACQUIRE_LEVEL_TOO_LOW",
            Self::MissingRequirement { .. } => "ACQUIRE_MISSING_REQUIREMENT",
            Self::MissingUltimateParams { .. } => "ACQUIRE_MISSING_ULTIMATE_PARAMS",
            Self::UnknownSkill(_) => "ACQUIRE_UNKNOWN_SKILL",
        }
    }
}
