//! Arena module for the fighting simulation.
//!
//! The Arena is the explicit context object for one match. It holds:
//! - The two-combatant roster, addressed by [`CombatantId`]
//! - The fixed platform layout
//! - Transient effects (sparks, screen shake) and their RNGs
//! - The tick counter
//!
//! Resolvers receive the arena by mutable reference inside a
//! [`TickContext`](crate::resolver::TickContext); nothing lives in module
//! state.
//!
//! # Determinism
//!
//! Spark spray is drawn from a `ChaCha8Rng` seeded with the match seed.
//! Screen-shake offsets use a second stream so that how often a renderer
//! advances effects cannot change what the simulation produces.
//! [`Arena::reset`] reseeds both, so a restarted match is indistinguishable
//! from a new one.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::arena::Arena;
//! use stickbrawl_core::config::MatchConfig;
//! use stickbrawl_core::entity::CombatantId;
//!
//! let arena = Arena::new(&MatchConfig::default());
//! assert_eq!(arena.platforms().len(), 4);
//! assert_eq!(arena.combatant(CombatantId::One).health, 100.0);
//! assert!(arena.combatant_by_number(3).is_err());
//! ```

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{MatchConfig, WorldBounds};
use crate::effects::Effects;
use crate::entity::{Combatant, CombatantId, Platform};
use crate::error::{Result, SimError};

/// Offset between the spark stream and the shake stream seeds.
const SHAKE_STREAM: u64 = 0x5348_414b_4500_0001;

/// Context object for one match.
#[derive(Debug, Clone)]
pub struct Arena {
    /// Ticks completed since match start.
    tick: u64,
    /// Playfield size.
    world: WorldBounds,
    /// Seed used for both effect streams.
    seed: u64,
    /// Roster in [`CombatantId::index`] order.
    combatants: [Combatant; 2],
    /// Static layout.
    platforms: Vec<Platform>,
    /// Sparks and shake.
    effects: Effects,
    /// Feeds hit bursts.
    spark_rng: ChaCha8Rng,
    /// Feeds shake offsets.
    shake_rng: ChaCha8Rng,
}

impl Arena {
    /// Creates the opening state of a match.
    ///
    /// The configuration is assumed to be validated.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let world = config.world;
        Self {
            tick: 0,
            world,
            seed: config.seed,
            combatants: CombatantId::ALL.map(|id| Combatant::spawn(id, world.width)),
            platforms: Platform::standard_layout(world.width, world.height),
            effects: Effects::default(),
            spark_rng: ChaCha8Rng::seed_from_u64(config.seed),
            shake_rng: ChaCha8Rng::seed_from_u64(config.seed ^ SHAKE_STREAM),
        }
    }

    /// Restores the opening state, keeping world size and seed.
    pub fn reset(&mut self) {
        let world = self.world;
        let seed = self.seed;
        self.tick = 0;
        self.combatants = CombatantId::ALL.map(|id| Combatant::spawn(id, world.width));
        self.platforms = Platform::standard_layout(world.width, world.height);
        self.effects.clear();
        self.spark_rng = ChaCha8Rng::seed_from_u64(seed);
        self.shake_rng = ChaCha8Rng::seed_from_u64(seed ^ SHAKE_STREAM);
    }

    /// Ticks completed since match start.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }

    /// Advances the tick counter.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Playfield size.
    #[must_use]
    pub const fn world(&self) -> WorldBounds {
        self.world
    }

    /// Seed the effect streams were created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    // -------------------------------------------------------------------------
    // Roster
    // -------------------------------------------------------------------------

    /// Returns a combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> &Combatant {
        &self.combatants[id.index()]
    }

    /// Returns a combatant mutably.
    #[must_use]
    pub fn combatant_mut(&mut self, id: CombatantId) -> &mut Combatant {
        &mut self.combatants[id.index()]
    }

    /// Looks up a combatant by raw player number.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownCombatant`] for anything but 1 or 2.
    pub fn combatant_by_number(&self, number: u8) -> Result<&Combatant> {
        let id = CombatantId::try_from(number)?;
        Ok(self.combatant(id))
    }

    /// Both combatants in roster order.
    #[must_use]
    pub const fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    /// Both combatants mutably, in roster order.
    #[must_use]
    pub fn combatants_mut(&mut self) -> &mut [Combatant; 2] {
        &mut self.combatants
    }

    /// Splits the roster into `(id, opponent)`.
    #[must_use]
    pub fn pair_mut(&mut self, id: CombatantId) -> (&mut Combatant, &mut Combatant) {
        let [one, two] = &mut self.combatants;
        match id {
            CombatantId::One => (one, two),
            CombatantId::Two => (two, one),
        }
    }

    // -------------------------------------------------------------------------
    // Platforms and effects
    // -------------------------------------------------------------------------

    /// The static platform layout.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Splits out the roster and the platforms for collision passes.
    #[must_use]
    pub fn roster_and_platforms_mut(&mut self) -> (&mut [Combatant; 2], &[Platform]) {
        (&mut self.combatants, &self.platforms)
    }

    /// Current effects.
    #[must_use]
    pub const fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Emits the spark burst and shake for a confirmed hit.
    pub fn emit_hit_effects(&mut self, impact: Vec2, knockback_scale: f32) {
        self.effects.shake(knockback_scale);
        self.effects.burst(impact, &mut self.spark_rng);
    }

    /// Advances effects by one rendered frame; returns the camera offset.
    pub fn advance_effects(&mut self) -> Vec2 {
        self.effects.advance(&mut self.shake_rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HIT_PARTICLE_COUNT, INITIAL_PLAYER_HEALTH};

    fn arena() -> Arena {
        Arena::new(&MatchConfig::with_seed(11))
    }

    mod roster_tests {
        use super::*;

        #[test]
        fn opens_with_two_fresh_combatants() {
            let arena = arena();
            for id in CombatantId::ALL {
                let c = arena.combatant(id);
                assert_eq!(c.id, id);
                assert_eq!(c.health, INITIAL_PLAYER_HEALTH);
                assert!(!c.is_ko());
                assert_eq!(c.combo.count(), 0);
            }
        }

        #[test]
        fn lookup_by_number_is_guarded() {
            let arena = arena();
            assert_eq!(arena.combatant_by_number(2).unwrap().id, CombatantId::Two);
            assert_eq!(
                arena.combatant_by_number(0).unwrap_err(),
                SimError::UnknownCombatant(0)
            );
            assert!(arena.combatant_by_number(255).is_err());
        }

        #[test]
        fn pair_mut_orders_by_attacker() {
            let mut arena = arena();
            let (a, b) = arena.pair_mut(CombatantId::Two);
            assert_eq!(a.id, CombatantId::Two);
            assert_eq!(b.id, CombatantId::One);
            b.health = 5.0;
            assert_eq!(arena.combatant(CombatantId::One).health, 5.0);
        }
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn reset_restores_opening_state() {
            let fresh = arena();
            let mut arena = arena();
            arena.combatant_mut(CombatantId::One).health = 3.0;
            arena.combatant_mut(CombatantId::Two).position = Vec2::new(9.0, 9.0);
            arena.emit_hit_effects(Vec2::ZERO, 1.0);
            arena.advance_tick();

            arena.reset();

            assert_eq!(arena.current_tick(), 0);
            assert_eq!(arena.combatants(), fresh.combatants());
            assert_eq!(arena.platforms(), fresh.platforms());
            assert_eq!(arena.effects(), fresh.effects());
        }

        #[test]
        fn reset_reseeds_sparks() {
            let mut first = arena();
            first.emit_hit_effects(Vec2::ZERO, 1.0);
            let sparks = first.effects().particles.clone();

            first.reset();
            first.emit_hit_effects(Vec2::ZERO, 1.0);
            assert_eq!(first.effects().particles, sparks);
        }
    }

    mod effects_tests {
        use super::*;

        #[test]
        fn hit_effects_emit_burst_and_shake() {
            let mut arena = arena();
            arena.emit_hit_effects(Vec2::new(5.0, 5.0), 0.2);
            assert_eq!(arena.effects().particles.len(), HIT_PARTICLE_COUNT);
            assert!(arena.effects().shake.duration > 0);
        }

        #[test]
        fn advancing_effects_leaves_sparks_stream_alone() {
            let mut a = arena();
            let mut b = arena();
            a.emit_hit_effects(Vec2::ZERO, 1.0);
            for _ in 0..5 {
                a.advance_effects();
            }
            a.emit_hit_effects(Vec2::ZERO, 1.0);
            b.emit_hit_effects(Vec2::ZERO, 1.0);
            b.emit_hit_effects(Vec2::ZERO, 1.0);
            // The second burst is identical whether or not frames were rendered.
            let tail_a = &a.effects().particles[a.effects().particles.len() - HIT_PARTICLE_COUNT..];
            let tail_b = &b.effects().particles[b.effects().particles.len() - HIT_PARTICLE_COUNT..];
            assert_eq!(tail_a, tail_b);
        }
    }
}
