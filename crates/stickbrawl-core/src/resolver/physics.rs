//! Physics resolver: intents, timers and integration.
//!
//! Per combatant, in roster order:
//! 1. Block gate (grounded and not attacking)
//! 2. Horizontal movement unless blocking; left wins over right
//! 3. Jump if grounded and not blocking
//! 4. Attack start if idle and not blocking
//! 5. Attack, hit-flash and combo timers tick down
//! 6. Gravity, then friction on horizontal velocity
//! 7. Position integrates; `grounded` is cleared for collision to re-derive
//!
//! A knocked-out combatant only falls: gravity, vertical integration and the
//! KO countdown. Horizontal motion stops entirely.
//!
//! Velocities are in pixels per tick; the tick itself is the time step.

use tracing::debug;

use crate::constants::{FRICTION, GRAVITY, JUMP_FORCE, PLAYER_SPEED};
use crate::entity::{Combatant, Facing};
use crate::input::Intent;
use crate::output::Event;

use super::{Resolver, TickContext};

/// Resolver for movement and integration.
///
/// # Example
///
/// ```
/// use stickbrawl_core::resolver::{PhysicsResolver, Resolver};
///
/// assert_eq!(PhysicsResolver::new().name(), "physics");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicsResolver;

impl PhysicsResolver {
    /// Creates the physics pass.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Advances one standing combatant by a tick.
    fn step_standing(fighter: &mut Combatant, intent: Intent, events: &mut Vec<Event>) {
        fighter.blocking = intent.block_granted(fighter);

        if !fighter.blocking {
            if intent.contains(Intent::MOVE_LEFT) {
                fighter.velocity.x = -PLAYER_SPEED;
                fighter.facing = Facing::Left;
            } else if intent.contains(Intent::MOVE_RIGHT) {
                fighter.velocity.x = PLAYER_SPEED;
                fighter.facing = Facing::Right;
            }

            if intent.contains(Intent::JUMP) && fighter.grounded {
                fighter.velocity.y = -JUMP_FORCE;
                fighter.grounded = false;
            }

            if intent.contains(Intent::ATTACK) && fighter.attack.begin() {
                debug!(combatant = %fighter.id, "attack started");
            }
        }

        fighter.attack.tick();
        fighter.hit_flash = fighter.hit_flash.saturating_sub(1);
        if fighter.combo.tick() {
            debug!(combatant = %fighter.id, "combo expired");
            events.push(Event::ComboChanged {
                combatant: fighter.id,
                count: 0,
            });
        }

        fighter.velocity.y += GRAVITY;
        fighter.velocity.x *= FRICTION;

        fighter.previous_position = fighter.position;
        fighter.position += fighter.velocity;
        fighter.grounded = false;
    }

    /// Advances one knocked-out combatant by a tick.
    fn step_knocked_out(fighter: &mut Combatant) {
        fighter.velocity.y += GRAVITY;
        fighter.previous_position = fighter.position;
        fighter.position.y += fighter.velocity.y;
        if fighter.ko.tick() {
            debug!(combatant = %fighter.id, "KO animation finished");
        }
    }
}

impl Resolver for PhysicsResolver {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        let intents = ctx.intents;
        for (fighter, intent) in ctx.arena.combatants_mut().iter_mut().zip(intents) {
            if fighter.is_ko() {
                Self::step_knocked_out(fighter);
            } else {
                Self::step_standing(fighter, intent, ctx.events);
            }
        }
    }
}
