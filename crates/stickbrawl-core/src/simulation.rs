//! Simulation driver: runs ticks, reports events, handles restart and
//! cancellation.
//!
//! Each call to [`Simulation::step`] runs one complete tick:
//!
//! 1. **INPUT**: Resolve the held keys into one [`Intent`] per combatant
//! 2. **RESOLUTION**: Run physics, collision and combat over the arena
//! 3. **MATCH END**: Check whether a knock-out animation has finished
//! 4. **REPORT**: Advance the tick, dispatch events to observers, log them
//!
//! No step suspends, so a tick is atomic with respect to input changes.
//!
//! # Termination
//!
//! Once the match is decided, or the driver has been cancelled, `step`
//! returns [`StepOutcome::Halted`] without touching state. Cancellation is
//! checked on entry to a tick and again just before the match-end callback,
//! so a cancel that races the final tick never lets the callback fire.
//!
//! # Example
//!
//! ```
//! use stickbrawl_core::input::InputSnapshot;
//! use stickbrawl_core::simulation::{Simulation, StepOutcome};
//!
//! let mut sim = Simulation::default();
//! let keys = InputSnapshot::from_keys(["d"]);
//!
//! for _ in 0..10 {
//!     assert_eq!(sim.step(&keys), StepOutcome::Running);
//! }
//! assert_eq!(sim.tick(), 10);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;
use tracing::{info, trace};

use crate::arena::Arena;
use crate::config::MatchConfig;
use crate::entity::{Combatant, CombatantId};
use crate::error::Result;
use crate::input::{resolve_intent, InputSnapshot, InputSource, Intent};
use crate::output::{Event, MatchObserver, MatchOutcome};
use crate::resolver::{
    evaluate_match_end, standard_pipeline, EventLog, EventRecord, Resolver, TickContext,
};
use crate::world_view::WorldView;

// =============================================================================
// Cancellation
// =============================================================================

/// Shared stop flag for a running match.
///
/// Clones share the flag, so a host can hand one to a teardown path on
/// another thread.
///
/// ```
/// use stickbrawl_core::simulation::CancelToken;
///
/// let token = CancelToken::new();
/// let remote = token.clone();
/// remote.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that no further ticks run.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// =============================================================================
// Simulation
// =============================================================================

/// Result of one call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The tick ran and the match goes on.
    Running,
    /// The tick ran and decided the match.
    MatchOver(MatchOutcome),
    /// No tick ran: the match was already over or the driver was cancelled.
    Halted,
}

/// Owns one match and advances it tick by tick.
///
/// All match state lives in the [`Arena`]; the driver adds the resolver
/// pipeline, the observers and the termination flags.
pub struct Simulation {
    /// Validated configuration, kept for restarts.
    config: MatchConfig,
    /// Match state.
    arena: Arena,
    /// Per-tick passes in execution order.
    resolvers: Vec<Box<dyn Resolver>>,
    /// Events not yet drained by the host.
    event_log: EventLog,
    /// HUD and game-over collaborators.
    observers: Vec<Box<dyn MatchObserver>>,
    /// Set once the match is decided.
    outcome: Option<MatchOutcome>,
    /// Teardown flag.
    cancel: CancelToken,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("arena", &self.arena)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("event_log", &self.event_log)
            .field("observers", &format!("[{} observers]", self.observers.len()))
            .field("outcome", &self.outcome)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_validated(MatchConfig::default())
    }
}

impl Simulation {
    /// Creates a match from a configuration.
    ///
    /// The opening health and combo values are recorded in the event log.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`](crate::error::SimError::InvalidConfig)
    /// if the configuration does not validate.
    ///
    /// # Example
    ///
    /// ```
    /// use stickbrawl_core::config::MatchConfig;
    /// use stickbrawl_core::simulation::Simulation;
    ///
    /// let sim = Simulation::new(MatchConfig::with_seed(12345)).unwrap();
    /// assert_eq!(sim.tick(), 0);
    /// assert_eq!(sim.seed(), 12345);
    ///
    /// let mut bad = MatchConfig::default();
    /// bad.world.width = -1.0;
    /// assert!(Simulation::new(bad).is_err());
    /// ```
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: MatchConfig) -> Self {
        let arena = Arena::new(&config);
        let mut event_log = EventLog::new();
        event_log.record(0, hud_reset_events(&arena));
        info!(seed = config.seed, "match created");
        Self {
            config,
            arena,
            resolvers: standard_pipeline(),
            event_log,
            observers: Vec::new(),
            outcome: None,
            cancel: CancelToken::new(),
        }
    }

    /// Executes one tick with the given held keys.
    ///
    /// # Execution Phases
    ///
    /// 1. **INPUT**: Each combatant's binding is looked up in `keys`.
    /// 2. **RESOLUTION**: Physics, collision and combat run in that order.
    /// 3. **MATCH END**: Evaluated once, after combat.
    /// 4. **REPORT**: The tick counter advances, then events go to every
    ///    observer in emission order and into the event log.
    pub fn step(&mut self, keys: &InputSnapshot) -> StepOutcome {
        if self.cancel.is_cancelled() || self.outcome.is_some() {
            return StepOutcome::Halted;
        }

        let tick = self.arena.current_tick();
        trace!(tick, "tick");

        let intents: [Intent; 2] =
            CombatantId::ALL.map(|id| resolve_intent(keys, self.config.binding(id)));

        let mut events = Vec::new();
        {
            let mut ctx = TickContext::new(&mut self.arena, intents, &mut events);
            for resolver in &self.resolvers {
                resolver.resolve(&mut ctx);
            }
        }

        let decided = evaluate_match_end(&self.arena);
        if let Some(outcome) = decided {
            info!(tick, %outcome, "match over");
            self.outcome = Some(outcome);
            events.push(Event::MatchEnded { outcome });
        }

        self.arena.advance_tick();
        dispatch(&mut self.observers, &self.arena, &events, &self.cancel);
        self.event_log.record(tick, events);

        match decided {
            Some(outcome) => StepOutcome::MatchOver(outcome),
            None => StepOutcome::Running,
        }
    }

    /// Runs up to `max_ticks` ticks, sampling `source` at each tick boundary.
    ///
    /// Stops early when the match ends or the driver is cancelled. Returns
    /// the outcome if the match has been decided.
    pub fn run(&mut self, source: &mut impl InputSource, max_ticks: u64) -> Option<MatchOutcome> {
        for _ in 0..max_ticks {
            let keys = source.sample(self.tick());
            match self.step(&keys) {
                StepOutcome::Running => {}
                StepOutcome::MatchOver(outcome) => return Some(outcome),
                StepOutcome::Halted => break,
            }
        }
        self.outcome
    }

    /// Starts the match over from its opening state.
    ///
    /// Combatants, platforms, effects, the tick counter and the RNGs all
    /// return to how [`Simulation::new`] left them. Observers are told the
    /// health and combo values have reset. Cancellation is not cleared.
    pub fn restart(&mut self) {
        self.arena.reset();
        self.outcome = None;
        self.event_log.clear();

        let events = hud_reset_events(&self.arena);
        dispatch(&mut self.observers, &self.arena, &events, &self.cancel);
        self.event_log.record(0, events);
        info!(seed = self.config.seed, "match restarted");
    }

    /// Stops the match; every later [`Simulation::step`] is a no-op.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            info!(tick = self.tick(), "match cancelled");
        }
        self.cancel.cancel();
    }

    /// A handle that cancels this match from elsewhere.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns `true` once cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Registers an observer and brings it up to date with the current
    /// health and combo values.
    pub fn add_observer(&mut self, mut observer: Box<dyn MatchObserver>) {
        for fighter in self.arena.combatants() {
            observer.set_health(fighter.id, fighter.health);
            observer.set_combo(fighter.id, fighter.combo.count());
        }
        self.observers.push(observer);
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        self.event_log.take_events()
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> WorldView<'_> {
        WorldView::new(&self.arena, self.outcome)
    }

    /// Advances sparks and shake by one rendered frame and returns the
    /// camera offset.
    ///
    /// Purely visual; never affects the outcome of later ticks.
    pub fn advance_effects(&mut self) -> Vec2 {
        self.arena.advance_effects()
    }

    /// Returns a read-only reference to the arena.
    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Returns a mutable reference to the arena.
    ///
    /// Use this for setting up scenarios between ticks.
    #[must_use]
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Returns one combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> &Combatant {
        self.arena.combatant(id)
    }

    /// Returns the current simulation tick.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.arena.current_tick()
    }

    /// The outcome, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Returns `true` once the match has been decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The configuration this match was built from.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Seed of the effect RNGs.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.config.seed
    }
}

/// Health and combo reports for the opening state.
fn hud_reset_events(arena: &Arena) -> Vec<Event> {
    arena
        .combatants()
        .iter()
        .flat_map(|fighter| {
            [
                Event::HealthChanged {
                    combatant: fighter.id,
                    health: fighter.health,
                },
                Event::ComboChanged {
                    combatant: fighter.id,
                    count: fighter.combo.count(),
                },
            ]
        })
        .collect()
}

/// Forwards events to observers in emission order.
fn dispatch(
    observers: &mut [Box<dyn MatchObserver>],
    arena: &Arena,
    events: &[Event],
    cancel: &CancelToken,
) {
    if observers.is_empty() {
        return;
    }
    for event in events {
        match *event {
            Event::HealthChanged { combatant, health } => {
                for observer in observers.iter_mut() {
                    observer.set_health(combatant, health);
                }
            }
            Event::ComboChanged { combatant, count } => {
                for observer in observers.iter_mut() {
                    observer.set_combo(combatant, count);
                }
            }
            Event::MatchEnded { outcome } => {
                if cancel.is_cancelled() {
                    info!(%outcome, "match-end callback suppressed by cancellation");
                    continue;
                }
                let winner = outcome.winner().map(|id| arena.combatant(id));
                for observer in observers.iter_mut() {
                    observer.match_ended(winner);
                }
            }
            Event::Hit { .. } | Event::KnockedOut { .. } => {}
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_PLAYER_HEALTH;
    use crate::error::{ConfigError, SimError};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Seen {
        health: Vec<(CombatantId, f32)>,
        combo: Vec<(CombatantId, u32)>,
        ended: Vec<Option<CombatantId>>,
    }

    struct Recorder(Arc<Mutex<Seen>>);

    impl MatchObserver for Recorder {
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

    fn recorder(sim: &mut Simulation) -> Arc<Mutex<Seen>> {
        let seen = Arc::new(Mutex::new(Seen::default()));
        sim.add_observer(Box::new(Recorder(Arc::clone(&seen))));
        seen
    }

    /// Leaves player two one tick away from its KO animation finishing.
    fn nearly_decided() -> Simulation {
        let mut sim = Simulation::default();
        let loser = sim.arena_mut().combatant_mut(CombatantId::Two);
        loser.knock_out();
        while loser.ko.timer() > 1 {
            loser.ko.tick();
        }
        sim
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn rejects_invalid_config() {
            let mut config = MatchConfig::default();
            config.bindings[0].left = String::new();
            let err = Simulation::new(config).unwrap_err();
            assert!(matches!(
                err,
                SimError::InvalidConfig(ConfigError::EmptyKey { player: 1, .. })
            ));
        }

        #[test]
        fn opening_events_logged() {
            let mut sim = Simulation::default();
            let records = sim.take_events();
            assert_eq!(records.len(), 4);
            assert!(records.iter().all(|r| r.tick == 0));
        }

        #[test]
        fn debug_output() {
            let debug_str = format!("{:?}", Simulation::default());
            assert!(debug_str.contains("Simulation"));
            assert!(debug_str.contains("3 resolvers"));
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn step_advances_tick() {
            let mut sim = Simulation::default();
            assert_eq!(sim.step(&InputSnapshot::new()), StepOutcome::Running);
            assert_eq!(sim.tick(), 1);
        }

        #[test]
        fn decides_and_halts() {
            let mut sim = nearly_decided();
            assert_eq!(
                sim.step(&InputSnapshot::new()),
                StepOutcome::MatchOver(MatchOutcome::Winner(CombatantId::One))
            );
            assert!(sim.is_over());

            let frozen = sim.arena().combatants().clone();
            let tick = sim.tick();
            for _ in 0..5 {
                assert_eq!(sim.step(&InputSnapshot::from_keys(["d"])), StepOutcome::Halted);
            }
            assert_eq!(sim.tick(), tick);
            assert_eq!(sim.arena().combatants(), &frozen);
        }

        #[test]
        fn match_end_is_logged_once() {
            let mut sim = nearly_decided();
            sim.take_events();
            sim.step(&InputSnapshot::new());
            sim.step(&InputSnapshot::new());
            let ended = sim
                .take_events()
                .into_iter()
                .filter(|r| matches!(r.event, Event::MatchEnded { .. }))
                .count();
            assert_eq!(ended, 1);
        }

        #[test]
        fn run_stops_at_match_end() {
            let mut sim = nearly_decided();
            let mut idle = InputSnapshot::new();
            assert_eq!(
                sim.run(&mut idle, 100),
                Some(MatchOutcome::Winner(CombatantId::One))
            );
            assert_eq!(sim.tick(), 1);
        }
    }

    mod observer_tests {
        use super::*;

        #[test]
        fn new_observer_is_synced() {
            let mut sim = Simulation::default();
            let seen = recorder(&mut sim);
            let seen = seen.lock().unwrap();
            assert_eq!(
                seen.health,
                vec![
                    (CombatantId::One, INITIAL_PLAYER_HEALTH),
                    (CombatantId::Two, INITIAL_PLAYER_HEALTH)
                ]
            );
            assert_eq!(seen.combo, vec![(CombatantId::One, 0), (CombatantId::Two, 0)]);
        }

        #[test]
        fn match_end_called_once_with_winner() {
            let mut sim = nearly_decided();
            let seen = recorder(&mut sim);
            sim.step(&InputSnapshot::new());
            sim.step(&InputSnapshot::new());
            assert_eq!(seen.lock().unwrap().ended, vec![Some(CombatantId::One)]);
        }

        #[test]
        fn restart_reports_fresh_hud() {
            let mut sim = Simulation::default();
            sim.arena_mut().combatant_mut(CombatantId::One).health = 40.0;
            let seen = recorder(&mut sim);
            seen.lock().unwrap().health.clear();

            sim.restart();

            let seen = seen.lock().unwrap();
            assert_eq!(
                seen.health,
                vec![
                    (CombatantId::One, INITIAL_PLAYER_HEALTH),
                    (CombatantId::Two, INITIAL_PLAYER_HEALTH)
                ]
            );
        }
    }

    mod cancel_tests {
        use super::*;

        #[test]
        fn cancelled_driver_halts() {
            let mut sim = Simulation::default();
            sim.cancel();
            assert_eq!(sim.step(&InputSnapshot::new()), StepOutcome::Halted);
            assert_eq!(sim.tick(), 0);
            assert!(sim.is_cancelled());
        }

        #[test]
        fn token_cancels_from_another_thread() {
            let mut sim = Simulation::default();
            let token = sim.cancel_token();
            std::thread::spawn(move || token.cancel()).join().unwrap();
            assert_eq!(sim.step(&InputSnapshot::new()), StepOutcome::Halted);
        }

        #[test]
        fn cancel_during_final_tick_suppresses_callback() {
            /// Tears the match down when player one's combo drops.
            struct CancelOnComboDrop(CancelToken);
            impl MatchObserver for CancelOnComboDrop {
                fn set_combo(&mut self, combatant: CombatantId, count: u32) {
                    if combatant == CombatantId::One && count == 0 {
                        self.0.cancel();
                    }
                }
            }

            let mut sim = nearly_decided();
            // Player one's combo expires on the same tick the match ends.
            let combo = &mut sim.arena_mut().combatant_mut(CombatantId::One).combo;
            combo.register_hit();
            while combo.timer() > 1 {
                combo.tick();
            }
            let seen = recorder(&mut sim);
            let token = sim.cancel_token();
            sim.add_observer(Box::new(CancelOnComboDrop(token)));
            assert!(!sim.is_cancelled());

            assert_eq!(
                sim.step(&InputSnapshot::new()),
                StepOutcome::MatchOver(MatchOutcome::Winner(CombatantId::One))
            );
            assert!(sim.is_cancelled());
            assert!(seen.lock().unwrap().ended.is_empty());
            assert_eq!(sim.step(&InputSnapshot::new()), StepOutcome::Halted);
        }

        #[test]
        fn restart_keeps_cancellation() {
            let mut sim = Simulation::default();
            sim.cancel();
            sim.restart();
            assert_eq!(sim.step(&InputSnapshot::new()), StepOutcome::Halted);
        }
    }
}
