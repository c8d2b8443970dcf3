//! Fixed gameplay constants.
//!
//! All timers are measured in ticks. The simulation assumes one tick per
//! display refresh at 60 Hz (see [`crate::clock::FIXED_DT`]), so a duration of
//! 60 ticks is one second of play.
//!
//! These values are load-bearing: the attack phase boundaries, the combo
//! window and the KO animation length are part of the game's feel and are
//! not exposed through [`crate::config::MatchConfig`].

// =============================================================================
// World
// =============================================================================

/// Default world width in pixels.
pub const CANVAS_WIDTH: f32 = 1024.0;

/// Default world height in pixels.
pub const CANVAS_HEIGHT: f32 = 576.0;

/// Downward acceleration applied to every combatant each tick.
pub const GRAVITY: f32 = 0.6;

/// Horizontal velocity multiplier applied each tick.
pub const FRICTION: f32 = 0.9;

// =============================================================================
// Platform layout
// =============================================================================

/// Thickness of the floor, measured up from the bottom of the world.
pub const FLOOR_HEIGHT: f32 = 50.0;

/// Gap between each mid ledge and its side wall.
pub const MID_LEDGE_INSET: f32 = 200.0;

/// Top edge of both mid ledges.
pub const MID_LEDGE_Y: f32 = 350.0;

/// Width of a mid ledge.
pub const MID_LEDGE_WIDTH: f32 = 250.0;

/// Top edge of the centred top ledge.
pub const TOP_LEDGE_Y: f32 = 200.0;

/// Width of the top ledge.
pub const TOP_LEDGE_WIDTH: f32 = 300.0;

/// Thickness of every ledge.
pub const LEDGE_THICKNESS: f32 = 20.0;

/// Narrowest world in which the two mid ledges do not overlap.
pub const MIN_WORLD_WIDTH: f32 = 2.0 * (MID_LEDGE_INSET + MID_LEDGE_WIDTH);

/// The floor must sit strictly below the mid ledges; worlds must be taller
/// than this.
pub const MIN_WORLD_HEIGHT: f32 = MID_LEDGE_Y + LEDGE_THICKNESS + FLOOR_HEIGHT;

// =============================================================================
// Combatants
// =============================================================================

/// Combatant bounding box width.
pub const PLAYER_WIDTH: f32 = 50.0;

/// Combatant bounding box height.
pub const PLAYER_HEIGHT: f32 = 90.0;

/// Health every combatant starts a match with; also the upper clamp.
pub const INITIAL_PLAYER_HEALTH: f32 = 100.0;

/// Horizontal speed set by a movement intent.
pub const PLAYER_SPEED: f32 = 5.0;

/// Upward velocity applied by a jump.
pub const JUMP_FORCE: f32 = 15.0;

/// Spawn height (top edge) for both combatants.
pub const SPAWN_Y: f32 = 100.0;

/// Render colour of combatant one.
pub const PLAYER_1_COLOR: &str = "#ef4444";

/// Render colour of combatant two.
pub const PLAYER_2_COLOR: &str = "#3b82f6";

// =============================================================================
// Combat
// =============================================================================

/// Length of a full attack in ticks.
pub const ATTACK_DURATION: u32 = 20;

/// Attack timer value on the single tick that evaluates hit detection.
pub const ATTACK_HIT_FRAME: u32 = ATTACK_DURATION - 6;

/// Horizontal reach measured from the attacker's leading edge.
pub const ATTACK_RANGE: f32 = 70.0;

/// Base damage of one hit.
pub const ATTACK_DAMAGE: f32 = 10.0;

/// Magnitude of the horizontal knockback; half of it is applied upward.
pub const KNOCKBACK_FORCE: f32 = 7.0;

/// Ticks the hit flash stays visible on a struck combatant.
pub const HIT_FLASH_DURATION: u32 = 10;

/// Fraction of damage a blocking combatant still takes.
pub const BLOCK_DAMAGE_REDUCTION: f32 = 0.2;

/// Fraction of knockback a blocking combatant still takes.
pub const BLOCK_KNOCKBACK_REDUCTION: f32 = 0.2;

/// Ticks a combo stays alive without a new hit.
pub const COMBO_MAX_TIME: u32 = 60;

/// Extra damage per combo hit beyond the first.
pub const COMBO_DAMAGE_MULTIPLIER: f32 = 0.1;

/// Ticks a knocked-out combatant falls before the match can end.
pub const KO_ANIMATION_DURATION: u32 = 60;

// =============================================================================
// Effects
// =============================================================================

/// Particles emitted per confirmed hit.
pub const HIT_PARTICLE_COUNT: usize = 15;

/// Lifespan of a hit particle in ticks.
pub const HIT_PARTICLE_LIFESPAN: u32 = 20;

/// Spread of hit particle velocity on each axis (full width of the range).
pub const HIT_PARTICLE_SPREAD: f32 = 8.0;

/// Gravity scale applied to sparks.
pub const PARTICLE_GRAVITY_SCALE: f32 = 0.1;

/// Ticks of screen shake triggered by a hit.
pub const SCREEN_SHAKE_DURATION: u32 = 10;

/// Screen shake magnitude for an unblocked hit.
pub const SCREEN_SHAKE_MAGNITUDE: f32 = 5.0;

// =============================================================================
// Controls
// =============================================================================

/// Default key bindings for combatant one: left, right, jump, attack, block.
pub const PLAYER_1_KEYS: [&str; 5] = ["a", "d", "w", "f", "s"];

/// Default key bindings for combatant two: left, right, jump, attack, block.
pub const PLAYER_2_KEYS: [&str; 5] = ["arrowleft", "arrowright", "arrowup", "/", "arrowdown"];
