//! Input resolution: pressed keys in, per-combatant intents out.
//!
//! The simulation never listens for key events. The host samples whatever
//! event source it has into an [`InputSnapshot`] at each tick boundary and
//! hands it to [`Simulation::step`](crate::simulation::Simulation::step).
//! [`resolve_intent`] then turns the snapshot into an [`Intent`] per
//! combatant using that combatant's [`ControlBinding`]. Intents carry no
//! memory between ticks.
//!
//! Key names are compared after [`normalize_key`]: case and surrounding
//! whitespace are ignored. Unknown keys are ignored too.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::input::{resolve_intent, ControlBinding, InputSnapshot, Intent};
//!
//! let mut keys = InputSnapshot::new();
//! keys.press("D");
//! keys.press("f");
//!
//! let intent = resolve_intent(&keys, &ControlBinding::player_one());
//! assert_eq!(intent, Intent::MOVE_RIGHT | Intent::ATTACK);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::constants::{PLAYER_1_KEYS, PLAYER_2_KEYS};
use crate::entity::Combatant;

bitflags! {
    /// Actions a combatant is asking for this tick.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Intent: u8 {
        /// Move towards smaller x.
        const MOVE_LEFT = 1 << 0;
        /// Move towards larger x.
        const MOVE_RIGHT = 1 << 1;
        /// Jump if grounded.
        const JUMP = 1 << 2;
        /// Start an attack if idle.
        const ATTACK = 1 << 3;
        /// Hold block if grounded and not attacking.
        const BLOCK = 1 << 4;
    }
}

impl Intent {
    /// Block gate: blocking is granted only while grounded and not mid-attack.
    ///
    /// This is a read-only check; the physics pass stores the result.
    #[must_use]
    pub fn block_granted(self, combatant: &Combatant) -> bool {
        self.contains(Self::BLOCK) && combatant.grounded && !combatant.is_attacking()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Canonical form of a key name: trimmed and lowercased.
///
/// ```
/// use stickbrawl_core::input::normalize_key;
///
/// assert_eq!(normalize_key(" ArrowLeft "), "arrowleft");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// The set of keys held down at a tick boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pressed: BTreeSet<String>,
}

impl InputSnapshot {
    /// An empty snapshot: nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from the keys currently held.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut snapshot = Self::new();
        for key in keys {
            snapshot.press(key.as_ref());
        }
        snapshot
    }

    /// Marks a key as held.
    pub fn press(&mut self, key: &str) {
        self.pressed.insert(normalize_key(key));
    }

    /// Marks a key as released.
    pub fn release(&mut self, key: &str) {
        self.pressed.remove(&normalize_key(key));
    }

    /// Applies a key event: `down == true` for press, `false` for release.
    pub fn set(&mut self, key: &str, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Returns `true` if the key is held.
    #[must_use]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(&normalize_key(key))
    }

    /// Releases every key.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Returns `true` if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

// =============================================================================
// Bindings
// =============================================================================

/// The five keys that drive one combatant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlBinding {
    /// Move left.
    pub left: String,
    /// Move right.
    pub right: String,
    /// Jump.
    pub jump: String,
    /// Attack.
    pub attack: String,
    /// Block.
    pub block: String,
}

impl ControlBinding {
    /// Builds a binding from `[left, right, jump, attack, block]`.
    #[must_use]
    pub fn from_keys(keys: [&str; 5]) -> Self {
        let [left, right, jump, attack, block] = keys.map(normalize_key);
        Self {
            left,
            right,
            jump,
            attack,
            block,
        }
    }

    /// Default keys for player one (WASD plus F).
    #[must_use]
    pub fn player_one() -> Self {
        Self::from_keys(PLAYER_1_KEYS)
    }

    /// Default keys for player two (arrows plus slash).
    #[must_use]
    pub fn player_two() -> Self {
        Self::from_keys(PLAYER_2_KEYS)
    }

    /// Action name and key pairs in a fixed order.
    #[must_use]
    pub fn actions(&self) -> [(&'static str, &str); 5] {
        [
            ("left", self.left.as_str()),
            ("right", self.right.as_str()),
            ("jump", self.jump.as_str()),
            ("attack", self.attack.as_str()),
            ("block", self.block.as_str()),
        ]
    }
}

/// Derives a combatant's intent from the held keys.
#[must_use]
pub fn resolve_intent(keys: &InputSnapshot, binding: &ControlBinding) -> Intent {
    let mut intent = Intent::empty();
    intent.set(Intent::MOVE_LEFT, keys.is_pressed(&binding.left));
    intent.set(Intent::MOVE_RIGHT, keys.is_pressed(&binding.right));
    intent.set(Intent::JUMP, keys.is_pressed(&binding.jump));
    intent.set(Intent::ATTACK, keys.is_pressed(&binding.attack));
    intent.set(Intent::BLOCK, keys.is_pressed(&binding.block));
    intent
}

// =============================================================================
// Sources
// =============================================================================

/// Anything that can be sampled for held keys once per tick.
///
/// Hosts wrap their event capture in this trait; tests use
/// [`ScriptedInput`] to replay exact key sequences.
pub trait InputSource {
    /// Returns the keys held at the start of `tick`.
    fn sample(&mut self, tick: u64) -> InputSnapshot;
}

impl InputSource for InputSnapshot {
    fn sample(&mut self, _tick: u64) -> InputSnapshot {
        self.clone()
    }
}

/// Replays key changes at fixed ticks.
///
/// Each scheduled entry replaces the whole held-key set from that tick on,
/// until the next entry.
///
/// # Example
///
/// ```
/// use stickbrawl_core::input::{InputSnapshot, InputSource, ScriptedInput};
///
/// let mut script = ScriptedInput::new()
///     .at(0, &["d"])
///     .at(10, &[]);
///
/// assert!(script.sample(5).is_pressed("d"));
/// assert!(script.sample(10).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    schedule: BTreeMap<u64, InputSnapshot>,
}

impl ScriptedInput {
    /// An empty script: nothing is ever held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds exactly `keys` from `tick` onward.
    #[must_use]
    pub fn at(mut self, tick: u64, keys: &[&str]) -> Self {
        self.schedule
            .insert(tick, InputSnapshot::from_keys(keys.iter().copied()));
        self
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, tick: u64) -> InputSnapshot {
        self.schedule
            .range(..=tick)
            .next_back()
            .map(|(_, keys)| keys.clone())
            .unwrap_or_default()
    }
}
