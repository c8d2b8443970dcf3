//! # Stickbrawl Core
//!
//! Frame-driven simulation for a two-player stick-figure brawler.
//!
//! This crate owns the rules of a match: movement under gravity and friction,
//! one-way platforms, attacks with a single hit frame, combos, blocking,
//! knockback and knock-outs. It never draws, plays sound or reads devices;
//! hosts feed it held keys and read back a [`WorldView`](world_view::WorldView)
//! and [`Event`](output::Event)s.
//!
//! ## Architecture
//!
//! - **Arena**: the explicit context object holding both combatants, the
//!   platforms, visual effects and the seeded RNGs
//! - **Resolvers**: physics, collision and combat passes run in a fixed order
//!   every tick
//! - **Simulation**: the driver that samples input, runs the passes, decides
//!   the match and notifies observers
//!
//! ## Usage
//!
//! ```
//! use stickbrawl_core::config::MatchConfig;
//! use stickbrawl_core::input::ScriptedInput;
//! use stickbrawl_core::simulation::Simulation;
//!
//! let mut sim = Simulation::new(MatchConfig::with_seed(7)).unwrap();
//! let mut script = ScriptedInput::new().at(0, &["d", "arrowleft"]).at(30, &["f"]);
//!
//! let outcome = sim.run(&mut script, 120);
//! assert!(outcome.is_none());
//! assert_eq!(sim.tick(), 120);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod clock;
pub mod config;
pub mod constants;
pub mod effects;
pub mod entity;
pub mod error;
pub mod input;
pub mod output;
pub mod resolver;
pub mod simulation;
pub mod world_view;

pub use arena::Arena;
pub use config::MatchConfig;
pub use entity::{Combatant, CombatantId, Platform};
pub use error::{ConfigError, Result, SimError};
pub use input::{InputSnapshot, InputSource, Intent};
pub use output::{Event, MatchObserver, MatchOutcome};
pub use simulation::{CancelToken, Simulation, StepOutcome};
pub use world_view::WorldView;

#[cfg(test)]
mod tests;
