//! Match configuration.
//!
//! Only the surroundings of a match are configurable: world size, RNG seed
//! and key bindings. Gameplay rules are fixed in [`crate::constants`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, MIN_WORLD_HEIGHT, MIN_WORLD_WIDTH};
use crate::entity::CombatantId;
use crate::error::ConfigError;
use crate::input::{normalize_key, ControlBinding};

/// Size of the playfield in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Horizontal extent; combatants are clamped to `[0, width]`. At least
    /// [`MIN_WORLD_WIDTH`].
    pub width: f32,
    /// Vertical extent; the floor sits 50 pixels above it. Must exceed
    /// [`MIN_WORLD_HEIGHT`].
    pub height: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Configuration for one match.
///
/// # Example
///
/// ```
/// use stickbrawl_core::config::MatchConfig;
///
/// let config = MatchConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.world.width, 1024.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Playfield size.
    pub world: WorldBounds,
    /// Seed for the effects RNG; restarts reuse it.
    pub seed: u64,
    /// Key bindings for player one then player two.
    pub bindings: [ControlBinding; 2],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),
            seed: 0,
            bindings: [ControlBinding::player_one(), ControlBinding::player_two()],
        }
    }
}

impl MatchConfig {
    /// Default configuration with a specific seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation
    /// error from [`MatchConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the binding for a combatant.
    #[must_use]
    pub fn binding(&self, id: CombatantId) -> &ControlBinding {
        &self.bindings[id.index()]
    }

    /// Checks that the world fits the platform layout and that all ten keys
    /// are non-empty and distinct.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let WorldBounds { width, height } = self.world;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidWorldSize { width, height });
        }
        if width < MIN_WORLD_WIDTH {
            return Err(ConfigError::WorldTooNarrow {
                width,
                min_width: MIN_WORLD_WIDTH,
            });
        }
        if height <= MIN_WORLD_HEIGHT {
            return Err(ConfigError::WorldTooShort {
                height,
                min_height: MIN_WORLD_HEIGHT,
            });
        }

        let mut seen = HashSet::new();
        for id in CombatantId::ALL {
            for (action, key) in self.binding(id).actions() {
                let key = normalize_key(key);
                if key.is_empty() {
                    return Err(ConfigError::EmptyKey {
                        player: id.as_u8(),
                        action,
                    });
                }
                if !seen.insert(key.clone()) {
                    return Err(ConfigError::DuplicateKey { key });
                }
            }
        }
        Ok(())
    }
}
