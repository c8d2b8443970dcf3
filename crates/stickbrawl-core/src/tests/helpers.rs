//! Test helper functions for setting up matches and scenarios.
//!
//! This module provides factory functions and setup utilities that make
//! writing tests more ergonomic and consistent.

use std::sync::{Arc, Mutex, Once};

use glam::Vec2;

use crate::entity::{Combatant, CombatantId};
use crate::input::InputSnapshot;
use crate::output::MatchObserver;
use crate::simulation::{Simulation, StepOutcome};

/// Top of the floor in the default world.
pub const FLOOR_TOP: f32 = 526.0;

/// Player one's attack key.
pub const P1_ATTACK: &str = "f";

/// Player two's block key.
pub const P2_BLOCK: &str = "arrowdown";

/// Ticks from pressing attack until the hit frame resolves, inclusive.
pub const TICKS_TO_HIT: usize = 6;

static TRACING: Once = Once::new();

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// =============================================================================
// Scenario Setup
// =============================================================================

/// Puts a combatant at rest on the floor at `x`.
pub fn stand_on_floor(fighter: &mut Combatant, x: f32) {
    fighter.position = Vec2::new(x, FLOOR_TOP - fighter.size.y);
    fighter.previous_position = fighter.position;
    fighter.velocity = Vec2::ZERO;
    fighter.grounded = true;
}

/// A fresh match with both combatants on the floor, face to face, `gap`
/// pixels apart. Player one stands at `x`.
pub fn face_off_at(x: f32, gap: f32) -> Simulation {
    init_tracing();
    let mut sim = Simulation::default();
    let arena = sim.arena_mut();
    stand_on_floor(arena.combatant_mut(CombatantId::One), x);
    stand_on_floor(arena.combatant_mut(CombatantId::Two), x + 50.0 + gap);
    sim.take_events();
    sim
}

/// Face-off in the middle of the floor.
pub fn face_off(gap: f32) -> Simulation {
    face_off_at(400.0, gap)
}

/// Face-off with player two's back against the right wall, so knockback
/// cannot carry it out of reach.
pub fn cornered() -> Simulation {
    face_off_at(1024.0 - 100.0, 0.0)
}

/// Steps `ticks` times with the same held keys; returns the last outcome.
pub fn hold(sim: &mut Simulation, keys: &[&str], ticks: usize) -> StepOutcome {
    let snapshot = InputSnapshot::from_keys(keys.iter().copied());
    let mut outcome = StepOutcome::Running;
    for _ in 0..ticks {
        outcome = sim.step(&snapshot);
    }
    outcome
}

/// Steps with nothing held.
pub fn idle(sim: &mut Simulation, ticks: usize) -> StepOutcome {
    hold(sim, &[], ticks)
}

/// Current health of a combatant.
pub fn health(sim: &Simulation, id: CombatantId) -> f32 {
    sim.combatant(id).health
}

/// Asserts two floats agree to within `1e-3`.
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Observers
// =============================================================================

/// Everything a [`RecordingObserver`] saw, in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Observed {
    /// `set_health` calls.
    pub health: Vec<(CombatantId, f32)>,
    /// `set_combo` calls.
    pub combo: Vec<(CombatantId, u32)>,
    /// `match_ended` calls; `None` is a tie.
    pub ended: Vec<Option<CombatantId>>,
}

/// Observer that records into shared storage.
pub struct RecordingObserver(pub Arc<Mutex<Observed>>);

impl MatchObserver for RecordingObserver {
    fn set_health(&mut self, combatant: CombatantId, health: f32) {
        self.0.lock().unwrap().health.push((combatant, health));
    }

    fn set_combo(&mut self, combatant: CombatantId, count: u32) {
        self.0.lock().unwrap().combo.push((combatant, count));
    }

    fn match_ended(&mut self, winner: Option<&Combatant>) {
        self.0.lock().unwrap().ended.push(winner.map(|c| c.id));
    }
}

/// Attaches a recorder and clears what it saw while syncing.
pub fn attach_recorder(sim: &mut Simulation) -> Arc<Mutex<Observed>> {
    let observed = Arc::new(Mutex::new(Observed::default()));
    sim.add_observer(Box::new(RecordingObserver(Arc::clone(&observed))));
    *observed.lock().unwrap() = Observed::default();
    observed
}
