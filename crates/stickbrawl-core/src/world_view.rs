//! `WorldView` provides read-only access to match state for rendering.
//!
//! A view borrows the arena between ticks. It exposes every combatant,
//! platform and effect, but nothing the renderer does flows back into the
//! simulation. It serializes to JSON for hosts that render out of process.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::entity::CombatantId;
//! use stickbrawl_core::simulation::Simulation;
//!
//! let sim = Simulation::default();
//! let view = sim.view();
//!
//! assert_eq!(view.tick, 0);
//! assert_eq!(view.combatant(CombatantId::Two).facing.sign(), -1.0);
//! assert!(view.to_json().unwrap().contains("\"platforms\""));
//! ```

use serde::Serialize;

use crate::arena::Arena;
use crate::config::WorldBounds;
use crate::effects::Effects;
use crate::entity::{AttackPhase, Combatant, CombatantId, Platform};
use crate::output::MatchOutcome;

/// Borrowed snapshot of one match between ticks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorldView<'a> {
    /// Ticks completed.
    pub tick: u64,
    /// Playfield size.
    pub world: WorldBounds,
    /// Both combatants in roster order.
    pub combatants: &'a [Combatant; 2],
    /// Static layout.
    pub platforms: &'a [Platform],
    /// Sparks and shake.
    pub effects: &'a Effects,
    /// Set once the match is over.
    pub outcome: Option<MatchOutcome>,
}

impl<'a> WorldView<'a> {
    /// Creates a view of `arena`.
    #[must_use]
    pub fn new(arena: &'a Arena, outcome: Option<MatchOutcome>) -> Self {
        Self {
            tick: arena.current_tick(),
            world: arena.world(),
            combatants: arena.combatants(),
            platforms: arena.platforms(),
            effects: arena.effects(),
            outcome,
        }
    }

    /// Returns one combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> &'a Combatant {
        &self.combatants[id.index()]
    }

    /// Attack phase of a combatant, for picking a pose.
    #[must_use]
    pub fn attack_phase(&self, id: CombatantId) -> AttackPhase {
        self.combatant(id).attack.phase()
    }

    /// Returns `true` while the combatant should be drawn flashing.
    #[must_use]
    pub fn is_flashing(&self, id: CombatantId) -> bool {
        self.combatant(id).hit_flash > 0
    }

    /// Serializes the view.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures; none are expected for finite state.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
