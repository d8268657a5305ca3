//! Common error infrastructure for combat-core.
//!
//! The core has no fatal error class. Everything a caller can trigger is
//! either a rejected command (nothing mutated, try something else) or a
//! restore failure at the persistence boundary. Unknown special abilities and
//! unknown status names are not errors at all: they surface as unsuccessful
//! outcomes in the turn report.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error enum
//! - **No Mutation on Error**: A returned error guarantees state is untouched
//! - **Severity Classification**: Errors are categorized for recovery strategies

use crate::session::Turn;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same command may succeed later or another
    /// command can be chosen now.
    ///
    /// Examples: not your turn, not enough energy
    Recoverable,

    /// Invalid input; retrying unchanged will fail again.
    ///
    /// Examples: unknown skill id, unknown enemy id in a save record
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Why a player command was rejected.
///
/// A rejected command leaves health, defense, energy, inventory and the turn
/// exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("input ignored: it is currently the {turn} turn")]
    OutOfTurn { turn: Turn },

    #[error("combat has already ended")]
    CombatOver,

    #[error("unknown skill '{id}'")]
    UnknownSkill { id: String },

    #[error("unknown item '{id}'")]
    UnknownItem { id: String },

    #[error("not enough energy: {required} required, {available} available")]
    InsufficientEnergy { required: u32, available: u32 },

    #[error("skills are locked for {turns} more turn(s)")]
    LockedDown { turns: u32 },
}

impl CombatError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfTurn { .. } | Self::InsufficientEnergy { .. } | Self::LockedDown { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::CombatOver | Self::UnknownSkill { .. } | Self::UnknownItem { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfTurn { .. } => "out_of_turn",
            Self::CombatOver => "combat_over",
            Self::UnknownSkill { .. } => "unknown_skill",
            Self::UnknownItem { .. } => "unknown_item",
            Self::InsufficientEnergy { .. } => "insufficient_energy",
            Self::LockedDown { .. } => "locked_down",
        }
    }
}

/// Failure to rebuild a live instance from a persisted record.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("enemy '{id}' is not in the catalog")]
    UnknownEnemy { id: String },

    #[error("combat session could not start: enemy '{id}' is not in the catalog")]
    MissingEnemy { id: String },
}

impl CombatError for RestoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEnemy { .. } => "unknown_enemy",
            Self::MissingEnemy { .. } => "missing_enemy",
        }
    }
}
