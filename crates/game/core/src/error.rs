//! Common error infrastructure for shelter-core.
//!
//! Domain errors (`CostError`, `EffectError`, `RegistryError`, ...) live next to
//! the code that raises them. This module holds the shared classification used
//! by the engine to decide what is logged, what is surfaced to the player, and
//! what is swallowed.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later (cooldown, funds)
/// - **Validation**: the request is malformed and should not be retried as-is
/// - **Internal**: an engine invariant was violated; investigate
/// - **Fatal**: the engine cannot continue with the current configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// Recoverable error - can retry later or with different inputs.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - configuration or state unusable.
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

/// Common trait for all shelter-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a structured field in logs and in effect results.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
