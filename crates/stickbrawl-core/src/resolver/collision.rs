//! Collision resolver: platforms, world bounds and body contact.
//!
//! Runs after integration. For every standing combatant:
//! - **Landing**: falling, horizontally over a platform, bottom edge at or
//!   above the surface last tick and at or below it now. The combatant snaps
//!   onto the surface, stops falling and becomes grounded.
//! - **Bounds**: x is clamped to `[0, world_width - width]`. There is no
//!   vertical clamp.
//!
//! Platforms are one-way: they are never tested from the side or below.
//!
//! Then, if both combatants are standing and their boxes overlap strictly,
//! they are pushed apart horizontally by half the penetration each and their
//! horizontal velocities are swapped when the penetration is positive.
//!
//! Knocked-out combatants fall through everything.

use tracing::debug;

use crate::entity::{Combatant, Platform};

use super::{Resolver, TickContext};

/// Resolver for contact between combatants, platforms and the world edge.
///
/// # Example
///
/// ```
/// use stickbrawl_core::resolver::{CollisionResolver, Resolver};
///
/// assert_eq!(CollisionResolver::new().name(), "collision");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates the collision pass.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Snaps a falling combatant onto any platform it crossed this tick.
    pub fn land_on_platforms(fighter: &mut Combatant, platforms: &[Platform]) {
        let previous_bottom = fighter.previous_position.y + fighter.size.y;
        for platform in platforms {
            let top = platform.top();
            if platform.spans(fighter)
                && fighter.velocity.y >= 0.0
                && previous_bottom <= top
                && fighter.bottom() >= top
            {
                fighter.position.y = top - fighter.size.y;
                fighter.velocity.y = 0.0;
                fighter.grounded = true;
            }
        }
    }

    /// Keeps a combatant inside the horizontal world bounds.
    pub fn clamp_to_world(fighter: &mut Combatant, world_width: f32) {
        let max_x = world_width - fighter.size.x;
        if fighter.position.x < 0.0 {
            fighter.position.x = 0.0;
        } else if fighter.position.x > max_x {
            fighter.position.x = max_x;
        }
    }

    /// Pushes two overlapping combatants apart.
    ///
    /// Returns `true` if they were touching.
    pub fn separate(a: &mut Combatant, b: &mut Combatant) -> bool {
        if !a.overlaps(b) {
            return false;
        }

        let overlap = (a.right() - b.position.x).min(b.right() - a.position.x);
        if overlap > 0.0 {
            let push = overlap / 2.0;
            if a.center().x > b.center().x {
                a.position.x += push;
                b.position.x -= push;
            } else {
                a.position.x -= push;
                b.position.x += push;
            }
            std::mem::swap(&mut a.velocity.x, &mut b.velocity.x);
            debug!(overlap, "combatants pushed apart");
        }
        true
    }
}

impl Resolver for CollisionResolver {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        let world_width = ctx.arena.world().width;
        let (roster, platforms) = ctx.arena.roster_and_platforms_mut();

        for fighter in roster.iter_mut().filter(|f| !f.is_ko()) {
            Self::land_on_platforms(fighter, platforms);
            Self::clamp_to_world(fighter, world_width);
        }

        let [one, two] = roster;
        if !one.is_ko() && !two.is_ko() {
            Self::separate(one, two);
        }
    }
}
