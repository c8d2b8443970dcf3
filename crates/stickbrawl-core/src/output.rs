//! Events the simulation reports to its collaborators.
//!
//! Resolvers push [`Event`]s into the tick's event buffer as things happen.
//! After the tick completes, the [`Simulation`](crate::simulation::Simulation)
//! forwards them in emission order to every registered [`MatchObserver`]
//! (HUD health bars, combo counters, the game-over screen) and keeps them in
//! its [`EventLog`](crate::resolver::EventLog) for telemetry.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::entity::CombatantId;
//! use stickbrawl_core::output::{Event, MatchOutcome};
//!
//! let event = Event::MatchEnded { outcome: MatchOutcome::Winner(CombatantId::One) };
//! assert_eq!(event.to_string(), "match ended: P1 wins");
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::{Combatant, CombatantId};

/// How a match finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// One combatant is still standing.
    Winner(CombatantId),
    /// Both combatants were knocked out.
    Tie,
}

impl MatchOutcome {
    /// The winner, if there is one.
    #[must_use]
    pub const fn winner(self) -> Option<CombatantId> {
        match self {
            Self::Winner(id) => Some(id),
            Self::Tie => None,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(id) => write!(f, "{id} wins"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// A combatant's health was (re)reported. Sent on every resolved hit,
    /// even when the value did not change, and on match start.
    HealthChanged {
        /// Whose health.
        combatant: CombatantId,
        /// Clamped health after the change.
        health: f32,
    },
    /// A combatant's combo counter changed: a hit, being hit, a timeout or
    /// match start.
    ComboChanged {
        /// Whose combo.
        combatant: CombatantId,
        /// New combo count.
        count: u32,
    },
    /// A hit connected.
    Hit {
        /// Who struck.
        attacker: CombatantId,
        /// Who was struck.
        defender: CombatantId,
        /// Damage dealt after combo and block scaling.
        damage: f32,
        /// Velocity added to the defender.
        knockback: Vec2,
        /// Whether the defender was blocking.
        blocked: bool,
    },
    /// A combatant reached zero health.
    KnockedOut {
        /// Who went down.
        combatant: CombatantId,
    },
    /// The match is over. Emitted at most once per match.
    MatchEnded {
        /// Result.
        outcome: MatchOutcome,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HealthChanged { combatant, health } => write!(f, "{combatant} health {health}"),
            Self::ComboChanged { combatant, count } => write!(f, "{combatant} combo {count}"),
            Self::Hit {
                attacker,
                defender,
                damage,
                blocked,
                ..
            } => {
                write!(f, "{attacker} hit {defender} for {damage}")?;
                if *blocked {
                    write!(f, " (blocked)")?;
                }
                Ok(())
            }
            Self::KnockedOut { combatant } => write!(f, "{combatant} knocked out"),
            Self::MatchEnded { outcome } => write!(f, "match ended: {outcome}"),
        }
    }
}

/// Receives match updates; the HUD and game-over screen implement this.
///
/// All methods default to doing nothing, so an observer only overrides what
/// it cares about.
pub trait MatchObserver {
    /// Health of `combatant` is now `health`.
    fn set_health(&mut self, _combatant: CombatantId, _health: f32) {}

    /// Combo counter of `combatant` is now `count`.
    fn set_combo(&mut self, _combatant: CombatantId, _count: u32) {}

    /// The match is over. `winner` is `None` on a tie.
    ///
    /// Called at most once per match.
    fn match_ended(&mut self, _winner: Option<&Combatant>) {}
}
