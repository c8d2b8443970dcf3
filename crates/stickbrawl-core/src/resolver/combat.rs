//! Combat resolver: hit detection, combos, damage and knock-outs.
//!
//! Each attack checks for a hit on exactly one tick, the
//! [`AttackPhase::ActiveHit`] frame. Player one's attack is resolved before
//! player two's, so when both land on the same tick player two's hit sees
//! the state left behind by player one's (a reset combo, possibly a KO).
//!
//! # Hit test
//!
//! From the attacker's [`attack_origin`](Combatant::attack_origin), the
//! horizontal distance to the defender's centre must be under
//! [`ATTACK_RANGE`] and the vertical distance under the attacker's height.
//!
//! # On a hit
//!
//! - Attacker's combo grows and its window reopens; defender's combo drops
//! - Damage and knockback are scaled by [`hit_damage`] and [`knockback`]
//! - Defender flashes, the screen shakes and sparks burst at the defender's
//!   centre
//! - Health is reported after every hit; reaching zero is a knock-out

use glam::Vec2;
use tracing::{debug, info};

use crate::arena::Arena;
use crate::constants::{
    ATTACK_DAMAGE, ATTACK_RANGE, BLOCK_DAMAGE_REDUCTION, BLOCK_KNOCKBACK_REDUCTION,
    COMBO_DAMAGE_MULTIPLIER, HIT_FLASH_DURATION, KNOCKBACK_FORCE,
};
use crate::entity::{AttackPhase, Combatant, CombatantId, Facing};
use crate::output::{Event, MatchOutcome};

use super::{Resolver, TickContext};

/// Damage dealt by a hit at the given combo count.
///
/// Each hit past the first adds ten percent. Blocking cuts the result to a
/// fifth.
///
/// ```
/// use stickbrawl_core::resolver::hit_damage;
///
/// assert_eq!(hit_damage(1, false), 10.0);
/// assert!((hit_damage(3, false) - 12.0).abs() < 1e-4);
/// assert!((hit_damage(1, true) - 2.0).abs() < 1e-6);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn hit_damage(combo_count: u32, blocking: bool) -> f32 {
    let bonus = combo_count.saturating_sub(1) as f32 * COMBO_DAMAGE_MULTIPLIER;
    let damage = ATTACK_DAMAGE * (1.0 + bonus);
    if blocking {
        damage * BLOCK_DAMAGE_REDUCTION
    } else {
        damage
    }
}

/// Velocity added to a defender struck by an attacker facing `facing`.
#[must_use]
pub fn knockback(facing: Facing, blocking: bool) -> Vec2 {
    let scale = knockback_scale(blocking);
    Vec2::new(KNOCKBACK_FORCE * facing.sign(), -KNOCKBACK_FORCE / 2.0) * scale
}

fn knockback_scale(blocking: bool) -> f32 {
    if blocking {
        BLOCK_KNOCKBACK_REDUCTION
    } else {
        1.0
    }
}

/// Decides whether the match is over.
///
/// The match ends once a knocked-out combatant's animation has run out. If
/// both are down at that moment it is a tie.
#[must_use]
pub fn evaluate_match_end(arena: &Arena) -> Option<MatchOutcome> {
    let [one, two] = arena.combatants();
    if !one.ko.is_expired() && !two.ko.is_expired() {
        return None;
    }
    match (one.is_ko(), two.is_ko()) {
        (true, true) => Some(MatchOutcome::Tie),
        (true, false) => Some(MatchOutcome::Winner(CombatantId::Two)),
        (false, true) => Some(MatchOutcome::Winner(CombatantId::One)),
        (false, false) => None,
    }
}

/// Where the sparks go and how hard the screen shakes.
struct Impact {
    point: Vec2,
    knockback_scale: f32,
}

/// Resolver for attacks landing.
///
/// # Example
///
/// ```
/// use stickbrawl_core::resolver::{CombatResolver, Resolver};
///
/// assert_eq!(CombatResolver::new().name(), "combat");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatResolver;

impl CombatResolver {
    /// Creates the combat pass.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if the attacker's strike reaches the defender.
    #[must_use]
    pub fn in_reach(attacker: &Combatant, defender: &Combatant) -> bool {
        let origin = attacker.attack_origin();
        let delta = (defender.center() - origin).abs();
        delta.x < ATTACK_RANGE && delta.y < attacker.size.y
    }

    /// Applies a confirmed hit to both combatants.
    fn land_hit(
        attacker: &mut Combatant,
        defender: &mut Combatant,
        events: &mut Vec<Event>,
    ) -> Impact {
        debug_assert!(!defender.is_ko(), "knocked-out {} was hit", defender.id);

        let combo = attacker.combo.register_hit();
        events.push(Event::ComboChanged {
            combatant: attacker.id,
            count: combo,
        });
        defender.combo.reset();
        events.push(Event::ComboChanged {
            combatant: defender.id,
            count: 0,
        });

        let blocked = defender.blocking;
        let damage = hit_damage(combo, blocked);
        let push = knockback(attacker.facing, blocked);

        let health = defender.take_damage(damage);
        defender.hit_flash = HIT_FLASH_DURATION;
        defender.velocity += push;

        debug!(
            attacker = %attacker.id,
            defender = %defender.id,
            damage,
            combo,
            blocked,
            health,
            "hit"
        );
        events.push(Event::Hit {
            attacker: attacker.id,
            defender: defender.id,
            damage,
            knockback: push,
            blocked,
        });
        events.push(Event::HealthChanged {
            combatant: defender.id,
            health,
        });

        if health <= 0.0 {
            defender.knock_out();
            info!(combatant = %defender.id, "knocked out");
            events.push(Event::KnockedOut {
                combatant: defender.id,
            });
        }

        Impact {
            point: defender.center(),
            knockback_scale: knockback_scale(blocked),
        }
    }
}

impl Resolver for CombatResolver {
    fn name(&self) -> &'static str {
        "combat"
    }

    fn resolve(&self, ctx: &mut TickContext<'_>) {
        for id in CombatantId::ALL {
            let impact = {
                let (attacker, defender) = ctx.arena.pair_mut(id);
                if attacker.is_ko() || defender.is_ko() {
                    continue;
                }
                if attacker.attack.phase() != AttackPhase::ActiveHit {
                    continue;
                }
                if !Self::in_reach(attacker, defender) {
                    debug!(attacker = %id, "attack whiffed");
                    continue;
                }
                Self::land_hit(attacker, defender, ctx.events)
            };
            ctx.arena.emit_hit_effects(impact.point, impact.knockback_scale);
        }
    }
}
