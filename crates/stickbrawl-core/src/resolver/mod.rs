//! Resolver module: the per-tick update passes.
//!
//! A tick is a fixed sequence of resolvers, each mutating the arena in
//! turn:
//! 1. [`PhysicsResolver`]: intents, timers, gravity, friction, integration
//! 2. [`CollisionResolver`]: platform landing, world bounds, body push-apart
//! 3. [`CombatResolver`]: hit detection and hit effects
//!
//! Match-end evaluation follows combat, driven by
//! [`Simulation`](crate::simulation::Simulation).
//!
//! # Invariants
//!
//! - Resolvers are stateless; everything they touch lives in the [`Arena`]
//! - Combatants are processed in roster order (player one first)
//! - Events are pushed in the order things happen
//!
//! # Available Resolvers
//!
//! - [`PhysicsResolver`]: Movement and integration
//! - [`CollisionResolver`]: Contact resolution
//! - [`CombatResolver`]: Hits, combos and knock-outs
//!
//! [`EventLog`] is not a pass; it keeps the events emitted by them.

mod collision;
mod combat;
mod event;
mod physics;

pub use collision::CollisionResolver;
pub use combat::{evaluate_match_end, hit_damage, knockback, CombatResolver};
pub use event::{EventLog, EventRecord};
pub use physics::PhysicsResolver;

use crate::arena::Arena;
use crate::input::Intent;
use crate::output::Event;

/// Everything a resolver may read or write during one tick.
#[derive(Debug)]
pub struct TickContext<'a> {
    /// The match state.
    pub arena: &'a mut Arena,
    /// Resolved intents in roster order.
    pub intents: [Intent; 2],
    /// Events emitted so far this tick.
    pub events: &'a mut Vec<Event>,
}

impl<'a> TickContext<'a> {
    /// Builds a context for one tick.
    pub fn new(arena: &'a mut Arena, intents: [Intent; 2], events: &'a mut Vec<Event>) -> Self {
        Self {
            arena,
            intents,
            events,
        }
    }
}

/// One pass of the tick pipeline.
///
/// # Example
///
/// ```
/// use stickbrawl_core::resolver::{Resolver, TickContext};
///
/// struct Gravityless;
///
/// impl Resolver for Gravityless {
///     fn name(&self) -> &'static str {
///         "gravityless"
///     }
///
///     fn resolve(&self, ctx: &mut TickContext<'_>) {
///         for fighter in ctx.arena.combatants_mut() {
///             fighter.velocity.y = 0.0;
///         }
///     }
/// }
/// ```
pub trait Resolver: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Applies this pass to the arena.
    ///
    /// Must be deterministic given the same arena and intents.
    fn resolve(&self, ctx: &mut TickContext<'_>);
}

/// The standard pipeline in execution order.
#[must_use]
pub fn standard_pipeline() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(PhysicsResolver::new()),
        Box::new(CollisionResolver::new()),
        Box::new(CombatResolver::new()),
    ]
}
