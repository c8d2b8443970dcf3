//! Test module for determinism, integration and property tests.
//!
//! These tests drive whole matches through [`Simulation`](crate::Simulation):
//! - **Determinism tests**: same seed and same keys give identical matches
//! - **Integration tests**: movement, combat and match lifecycle end to end
//! - **Property tests**: rules that hold under arbitrary key sequences
//!
//! # Test Structure
//!
//! - `determinism.rs`: seeded replay and restart checks
//! - `integration.rs`: end-to-end scenarios on the default arena
//! - `properties.rs`: proptest-driven invariant checks
//! - `helpers.rs`: scenario setup and recording observers

mod helpers;
mod properties;
