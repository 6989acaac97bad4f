//! Error types for Hellgate.
//!
//! The numeric core never fails; these cover the boundaries around it
//! (resolving object ids, loading simulation constants).

use thiserror::Error;

use crate::ids::EntityId;

/// Top-level error type for Hellgate operations.
#[derive(Debug, Error)]
pub enum HellgateError {
    /// Entity lookup errors
    #[error("Entity error: {0}")]
    Entity(#[from] EntityError),

    /// Invalid simulation constants
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors resolving object ids against the entity arena.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Entity not found
    #[error("Entity not found: {0:?}")]
    NotFound(EntityId),

    /// Entity already despawned
    #[error("Entity already despawned: {0:?}")]
    AlreadyDespawned(EntityId),
}

/// Simulation constants outside their usable range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Friction must be in (0, 1]
    #[error("friction {raw:#x} outside (0, 1.0]")]
    FrictionOutOfRange {
        /// Raw fixed-point value
        raw: i32,
    },

    /// A constant that must not be negative
    #[error("{name} must not be negative (got {raw})")]
    Negative {
        /// Field name
        name: &'static str,
        /// Raw value
        raw: i32,
    },

    /// Event queue must hold at least one event
    #[error("event capacity must be at least 1")]
    ZeroEventCapacity,

    /// Config file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Result type alias for Hellgate operations.
pub type HellgateResult<T> = Result<T, HellgateError>;
