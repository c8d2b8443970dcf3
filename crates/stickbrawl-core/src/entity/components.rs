//! Countdown state machines carried by each combatant.
//!
//! Each machine wraps a private tick counter and exposes named states, so the
//! only way to move a timer is through the transitions defined here. Timers
//! never go below zero.

use serde::{Deserialize, Serialize};

use crate::constants::{ATTACK_DURATION, ATTACK_HIT_FRAME, COMBO_MAX_TIME, KO_ANIMATION_DURATION};

// =============================================================================
// Attack
// =============================================================================

/// Named phase of an attack, derived from the attack timer.
///
/// | timer    | phase       |
/// |----------|-------------|
/// | 0        | `Idle`      |
/// | 15..=20  | `WindUp`    |
/// | 14       | `ActiveHit` |
/// | 1..=13   | `Recovery`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackPhase {
    /// No attack in progress.
    Idle,
    /// Anticipation frames; cosmetic only.
    WindUp,
    /// The single tick on which hit detection runs.
    ActiveHit,
    /// Follow-through; a new attack cannot start yet.
    Recovery,
}

/// Attack timer for one combatant.
///
/// The timer is set to [`ATTACK_DURATION`] when an attack starts and loses
/// exactly one tick per [`AttackState::tick`]. Nothing else writes it, so
/// every attack passes through [`AttackPhase::ActiveHit`] exactly once unless
/// it is cancelled by a knock-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackState {
    timer: u32,
}

impl AttackState {
    /// Starts a new attack. Returns `false` if one is still running.
    pub fn begin(&mut self) -> bool {
        if self.timer > 0 {
            return false;
        }
        self.timer = ATTACK_DURATION;
        true
    }

    /// Advances the attack by one tick.
    pub fn tick(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }

    /// Drops any attack in progress.
    pub fn cancel(&mut self) {
        self.timer = 0;
    }

    /// Remaining ticks of the current attack.
    #[must_use]
    pub const fn timer(&self) -> u32 {
        self.timer
    }

    /// Returns `true` while an attack is in progress.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.timer > 0
    }

    /// Returns the named phase for the current timer value.
    #[must_use]
    pub const fn phase(&self) -> AttackPhase {
        match self.timer {
            0 => AttackPhase::Idle,
            t if t > ATTACK_HIT_FRAME => AttackPhase::WindUp,
            ATTACK_HIT_FRAME => AttackPhase::ActiveHit,
            _ => AttackPhase::Recovery,
        }
    }
}

// =============================================================================
// Combo
// =============================================================================

/// Rolling hit streak.
///
/// Invariant: `count == 0` whenever `timer == 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboState {
    count: u32,
    timer: u32,
}

impl ComboState {
    /// Records a landed hit and reopens the combo window.
    ///
    /// Returns the new combo count.
    pub fn register_hit(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.timer = COMBO_MAX_TIME;
        self.count
    }

    /// Drops the combo immediately.
    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0;
    }

    /// Advances the combo window by one tick.
    ///
    /// Returns `true` on the tick the window closes (timer goes 1 -> 0),
    /// which is when the count is cleared.
    pub fn tick(&mut self) -> bool {
        if self.timer == 0 {
            return false;
        }
        self.timer -= 1;
        if self.timer == 0 {
            self.count = 0;
            return true;
        }
        false
    }

    /// Current number of consecutive hits.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Ticks left before the combo drops.
    #[must_use]
    pub const fn timer(&self) -> u32 {
        self.timer
    }
}

// =============================================================================
// Knock-out
// =============================================================================

/// Whether a combatant is still fighting or playing out its KO fall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KoState {
    /// Fighting normally.
    #[default]
    Standing,
    /// Knocked out; `timer` counts down the fall animation.
    KnockedOut {
        /// Ticks left in the KO animation.
        timer: u32,
    },
}

impl KoState {
    /// Enters the knocked-out state with a full animation timer.
    pub fn knock_out(&mut self) {
        *self = Self::KnockedOut {
            timer: KO_ANIMATION_DURATION,
        };
    }

    /// Advances the KO animation by one tick.
    ///
    /// Returns `true` once the animation has run out. Always `false` for a
    /// standing combatant.
    pub fn tick(&mut self) -> bool {
        match self {
            Self::Standing => false,
            Self::KnockedOut { timer } => {
                *timer = timer.saturating_sub(1);
                *timer == 0
            }
        }
    }

    /// Returns `true` if knocked out.
    #[must_use]
    pub const fn is_ko(&self) -> bool {
        matches!(self, Self::KnockedOut { .. })
    }

    /// Returns `true` if knocked out and the animation has finished.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::KnockedOut { timer: 0 })
    }

    /// Remaining KO animation ticks, zero when standing.
    #[must_use]
    pub const fn timer(&self) -> u32 {
        match self {
            Self::Standing => 0,
            Self::KnockedOut { timer } => *timer,
        }
    }
}
