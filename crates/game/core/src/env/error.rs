//! Oracle and collaborator errors.
//!
//! Errors raised while validating definition records or talking to the
//! persistence collaborator.

use crate::error::{CombatError, ErrorSeverity};

/// A definition record is malformed or references something that does not exist.
///
/// Raised by [`DefinitionSet::validate`](super::DefinitionSet::validate) and the
/// per-record `validate` methods, normally at load time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error("{kind} definition has an empty id")]
    EmptyId { kind: &'static str },

    #[error("{kind} '{id}': field `{field}` must be {expected}, got {value}")]
    OutOfRange {
        kind: &'static str,
        id: String,
        field: &'static str,
        expected: &'static str,
        value: f32,
    },

    #[error("{kind} '{id}' references unknown {target_kind} '{target}'")]
    UnknownReference {
        kind: &'static str,
        id: String,
        target_kind: &'static str,
        target: String,
    },

    #[error("ultimate skill '{0}' has no ultimate parameters")]
    MissingUltimateParams(String),

    #[error("skill '{0}' requires itself")]
    SelfRequirement(String),

    #[error("duplicate {kind} id '{id}'")]
    Duplicate { kind: &'static str, id: String },
}

impl DefinitionError {
    /// Shorthand for range checks in `validate` implementations.
    pub fn out_of_range(
        kind: &'static str,
        id: &str,
        field: &'static str,
        expected: &'static str,
        value: f32,
    ) -> Self {
        Self::OutOfRange {
            kind,
            id: id.to_owned(),
            field,
            expected,
            value,
        }
    }

    pub fn unknown(kind: &'static str, id: &str, target_kind: &'static str, target: &str) -> Self {
        Self::UnknownReference {
            kind,
            id: id.to_owned(),
            target_kind,
            target: target.to_owned(),
        }
    }
}

impl CombatError for DefinitionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId { .. } => "DEFINITION_EMPTY_ID",
            Self::OutOfRange { .. } => "DEFINITION_OUT_OF_RANGE",
            Self::UnknownReference { .. } => "DEFINITION_UNKNOWN_REFERENCE",
            Self::MissingUltimateParams(_) => "DEFINITION_MISSING_ULTIMATE_PARAMS",
            Self::SelfRequirement(_) => "DEFINITION_SELF_REQUIREMENT",
            Self::Duplicate { .. } => "DEFINITION_DUPLICATE",
        }
    }
}

/// Persistence collaborator failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl CombatError for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Recoverable,
            Self::Serialization(_) | Self::Corrupt { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORE_IO",
            Self::Serialization(_) => "STORE_SERIALIZATION",
            Self::Corrupt { .. } => "STORE_CORRUPT",
        }
    }
}
