//! Error types for the simulation.
//!
//! The per-tick path is total and never fails. Errors only arise while
//! building a match: parsing or validating a [`MatchConfig`](crate::config::MatchConfig)
//! and converting raw player numbers into a [`CombatantId`](crate::entity::CombatantId).

use thiserror::Error;

/// Result type alias for simulation setup operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Problems found while validating a match configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// World width or height is zero, negative or not finite.
    #[error("world size must be positive and finite, got {width}x{height}")]
    InvalidWorldSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },

    /// The world is too narrow for the mid ledges to stay apart.
    #[error("world width {width} is below the platform layout minimum {min_width}")]
    WorldTooNarrow {
        /// Configured width.
        width: f32,
        /// Smallest accepted width.
        min_width: f32,
    },

    /// The world is too short for the floor to sit below the mid ledges.
    #[error("world height {height} must exceed the platform layout minimum {min_height}")]
    WorldTooShort {
        /// Configured height.
        height: f32,
        /// Height the world must exceed.
        min_height: f32,
    },

    /// A binding has an empty key name.
    #[error("player {player} has an empty key for '{action}'")]
    EmptyKey {
        /// Player number (1 or 2).
        player: u8,
        /// Action the key is bound to.
        action: &'static str,
    },

    /// The same key is bound to more than one action.
    #[error("key '{key}' is bound more than once")]
    DuplicateKey {
        /// The offending key name.
        key: String,
    },

    /// The JSON document could not be parsed.
    #[error("malformed config: {0}")]
    Parse(String),
}

/// Main error type for simulation setup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A player number outside `1..=2` was used.
    #[error("unknown combatant id {0}, expected 1 or 2")]
    UnknownCombatant(u8),

    /// The match configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
