//! Error types for the ChoreQuest ledger.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire ChoreQuest application.
///
/// Every caller-visible failure is a typed variant so that callers can match
/// on the failure kind instead of parsing message strings. Validation
/// failures are returned synchronously and never retried internally.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ChoreError {
    /// No caller identity was supplied by the authentication layer.
    #[error("Caller is not authenticated")]
    Unauthenticated,

    /// The caller has no profile yet, for operations requiring one.
    #[error("Caller has no registered profile")]
    NotRegistered,

    /// The caller attempted to register a second profile.
    #[error("Caller is already registered")]
    AlreadyRegistered,

    /// Role or ownership check failed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// Task state machine rule violated.
    #[error("Invalid task transition: {0}")]
    InvalidTransition(String),

    /// Redemption cost exceeds the caller's balance.
    #[error("Insufficient points: cost {cost}, balance {balance}")]
    InsufficientPoints { cost: u64, balance: u64 },

    /// Admin bootstrap attempted after an admin already exists.
    #[error("An admin profile already exists")]
    AdminAlreadyExists,

    /// The quest narrative collaborator failed; ledger state is unaffected.
    #[error("Narrative generator unavailable: {0}")]
    NarrativeUnavailable(String),

    /// A request argument failed validation (e.g. non-positive points).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChoreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::InvalidTransition(message.into())
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a NarrativeUnavailable error
    pub fn narrative_unavailable(message: impl Into<String>) -> Self {
        Self::NarrativeUnavailable(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Check if this is an InvalidTransition error
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Self::InvalidTransition(_))
    }

    /// Check if this is an InsufficientPoints error
    pub fn is_insufficient_points(&self) -> bool {
        matches!(self, Self::InsufficientPoints { .. })
    }

    /// Check if this is a NarrativeUnavailable error
    pub fn is_narrative_unavailable(&self) -> bool {
        matches!(self, Self::NarrativeUnavailable(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ChoreError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for ChoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ChoreError>`.
pub type Result<T> = std::result::Result<T, ChoreError>;
