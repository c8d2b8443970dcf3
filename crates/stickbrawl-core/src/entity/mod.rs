//! Entity types for the fighting simulation.
//!
//! This module provides the two kinds of things that live in an arena:
//! - [`Combatant`]: one of exactly two fighters, addressed by [`CombatantId`]
//! - [`Platform`]: a static axis-aligned rectangle combatants can stand on
//!
//! Combatants and platforms never reference each other. They meet only
//! through the geometric queries the resolvers run every tick.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::entity::{Combatant, CombatantId, Facing};
//!
//! let fighter = Combatant::new(CombatantId::Two, 700.0);
//! assert_eq!(fighter.facing, Facing::Left);
//! assert_eq!(fighter.health, 100.0);
//! assert!(!fighter.is_ko());
//! ```

pub mod components;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    FLOOR_HEIGHT, INITIAL_PLAYER_HEALTH, LEDGE_THICKNESS, MID_LEDGE_INSET, MID_LEDGE_WIDTH,
    MID_LEDGE_Y, PLAYER_1_COLOR, PLAYER_2_COLOR, PLAYER_HEIGHT, PLAYER_WIDTH, SPAWN_Y,
    TOP_LEDGE_WIDTH, TOP_LEDGE_Y,
};
use crate::error::SimError;

pub use components::{AttackPhase, AttackState, ComboState, KoState};

// =============================================================================
// Identity
// =============================================================================

/// Identifies one of the two combatants.
///
/// The roster always holds exactly two combatants, so the id is a closed
/// enum rather than an integer. Raw player numbers from outside the crate go
/// through [`TryFrom<u8>`], which rejects anything but 1 and 2.
///
/// # Example
///
/// ```
/// use stickbrawl_core::entity::CombatantId;
///
/// let id = CombatantId::try_from(2).unwrap();
/// assert_eq!(id, CombatantId::Two);
/// assert_eq!(id.opponent(), CombatantId::One);
/// assert!(CombatantId::try_from(3).is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    /// Player one, spawns on the left.
    One,
    /// Player two, spawns on the right.
    Two,
}

impl CombatantId {
    /// Both ids in roster order.
    pub const ALL: [Self; 2] = [Self::One, Self::Two];

    /// Position of this combatant in the roster array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// The player number (1 or 2).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// The other combatant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl TryFrom<u8> for CombatantId {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(SimError::UnknownCombatant(other)),
        }
    }
}

impl From<CombatantId> for u8 {
    fn from(id: CombatantId) -> Self {
        id.as_u8()
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.as_u8())
    }
}

/// Which way a combatant is looking; attacks go this way.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Towards smaller x.
    Left,
    /// Towards larger x.
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

// =============================================================================
// Combatant
// =============================================================================

/// A fighter.
///
/// Position is the top-left corner of the bounding box, with y growing
/// downward.
///
/// # Invariants
///
/// - `health` stays within `[0, INITIAL_PLAYER_HEALTH]`
/// - once knocked out, `grounded`, `blocking` and the attack state stay
///   cleared and the combatant neither gives nor receives hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Which side this is.
    pub id: CombatantId,
    /// Render colour as a CSS hex string.
    pub color: String,
    /// Top-left corner.
    pub position: Vec2,
    /// Position before this tick's integration.
    pub previous_position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Bounding box width and height.
    pub size: Vec2,
    /// Remaining health.
    pub health: f32,
    /// Facing direction.
    pub facing: Facing,
    /// Standing on a platform this tick.
    pub grounded: bool,
    /// Holding block this tick.
    pub blocking: bool,
    /// Attack timer.
    pub attack: AttackState,
    /// Ticks of hit flash left.
    pub hit_flash: u32,
    /// Hit streak.
    pub combo: ComboState,
    /// Knock-out state.
    pub ko: KoState,
}

impl Combatant {
    /// Creates a combatant at the spawn height with full health.
    ///
    /// Player one faces right, player two faces left.
    #[must_use]
    pub fn new(id: CombatantId, x: f32) -> Self {
        let (facing, color) = match id {
            CombatantId::One => (Facing::Right, PLAYER_1_COLOR),
            CombatantId::Two => (Facing::Left, PLAYER_2_COLOR),
        };
        let position = Vec2::new(x, SPAWN_Y);
        Self {
            id,
            color: color.to_string(),
            position,
            previous_position: position,
            velocity: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            health: INITIAL_PLAYER_HEALTH,
            facing,
            grounded: false,
            blocking: false,
            attack: AttackState::default(),
            hit_flash: 0,
            combo: ComboState::default(),
            ko: KoState::Standing,
        }
    }

    /// Creates a combatant at its standard spawn point for a world of the
    /// given width: a quarter in from its own side.
    #[must_use]
    pub fn spawn(id: CombatantId, world_width: f32) -> Self {
        let x = match id {
            CombatantId::One => world_width / 4.0,
            CombatantId::Two => world_width / 4.0 * 3.0 - PLAYER_WIDTH,
        };
        Self::new(id, x)
    }

    /// Returns `true` if knocked out.
    #[must_use]
    pub const fn is_ko(&self) -> bool {
        self.ko.is_ko()
    }

    /// Returns `true` while an attack is in progress.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attack.is_attacking()
    }

    /// Centre of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    /// Point attacks are measured from: the body edge in the facing
    /// direction, at mid-height.
    #[must_use]
    pub fn attack_origin(&self) -> Vec2 {
        let x = match self.facing {
            Facing::Right => self.right(),
            Facing::Left => self.position.x,
        };
        Vec2::new(x, self.position.y + self.size.y / 2.0)
    }

    /// Strict axis-aligned overlap test; touching edges do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.position.x < other.right()
            && self.right() > other.position.x
            && self.position.y < other.bottom()
            && self.bottom() > other.position.y
    }

    /// Subtracts damage and clamps health at zero.
    ///
    /// Returns the new health.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        debug_assert!(amount >= 0.0, "negative damage {amount}");
        self.health = (self.health - amount.max(0.0)).clamp(0.0, INITIAL_PLAYER_HEALTH);
        self.health
    }

    /// Enters the KO state and clears every action flag.
    pub fn knock_out(&mut self) {
        self.ko.knock_out();
        self.attack.cancel();
        self.blocking = false;
        self.grounded = false;
    }
}

// =============================================================================
// Platform
// =============================================================================

/// A static rectangle combatants can land on from above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner.
    pub position: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Platform {
    /// Creates a platform from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// The fixed four-platform layout: a floor, two mid ledges and a top
    /// ledge, positioned for a world of the given size.
    ///
    /// The platforms only stay inside the world and clear of each other for
    /// sizes accepted by [`MatchConfig::validate`](crate::config::MatchConfig::validate).
    #[must_use]
    pub fn standard_layout(world_width: f32, world_height: f32) -> Vec<Self> {
        vec![
            // Floor
            Self::new(0.0, world_height - FLOOR_HEIGHT, world_width, FLOOR_HEIGHT),
            // Mid ledges
            Self::new(MID_LEDGE_INSET, MID_LEDGE_Y, MID_LEDGE_WIDTH, LEDGE_THICKNESS),
            Self::new(
                world_width - MID_LEDGE_INSET - MID_LEDGE_WIDTH,
                MID_LEDGE_Y,
                MID_LEDGE_WIDTH,
                LEDGE_THICKNESS,
            ),
            // Top ledge
            Self::new(
                (world_width - TOP_LEDGE_WIDTH) / 2.0,
                TOP_LEDGE_Y,
                TOP_LEDGE_WIDTH,
                LEDGE_THICKNESS,
            ),
        ]
    }

    /// Y coordinate of the walkable surface.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.position.y
    }

    /// Returns `true` if the combatant's horizontal span strictly overlaps
    /// this platform's.
    #[must_use]
    pub fn spans(&self, combatant: &Combatant) -> bool {
        combatant.right() > self.position.x && combatant.position.x < self.position.x + self.size.x
    }
}
