//! Common error infrastructure for skirmish-core.
//!
//! This module provides the shared severity classification and the trait every
//! domain error implements. Domain-specific errors (e.g. [`AcquireError`],
//! [`UltimateError`]) are defined alongside the operations they guard.
//!
//! # Design Principles
//!
//! - **Atomic-or-noop**: every error is returned before any state is touched
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **No panics**: gameplay input never panics; failures are values
//!
//! [`AcquireError`]: crate::skill::AcquireError
//! [`UltimateError`]: crate::ultimate::UltimateError

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request was reasonable but cannot be honored right now
/// - **Validation**: the caller violated a documented precondition
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - surfaced as a no-op plus a warning event.
    ///
    /// Examples: skill requirement not met, unique skill already held
    Recoverable,

    /// Validation error - caller precondition violated.
    ///
    /// Examples: ultimate activated while charging, skill index out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - run cannot continue.
    ///
    /// Examples: persistent state that can no longer be read back
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all skirmish-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers for logs and tests
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
