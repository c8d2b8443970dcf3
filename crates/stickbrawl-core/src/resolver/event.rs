//! Event log for telemetry and replay checks.
//!
//! The log keeps every [`Event`] emitted since it was last drained, stamped
//! with the tick that produced it. It never mutates game state.
//!
//! # Usage
//!
//! The [`Simulation`](crate::simulation::Simulation) records each tick's
//! events after dispatching them to observers. Drain the log with
//! [`EventLog::take_events`], typically once per rendered frame.

use serde::{Deserialize, Serialize};

use crate::output::Event;

/// An event plus the tick it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Tick index, starting from zero at match start.
    pub tick: u64,
    /// What happened.
    pub event: Event,
}

/// Append-only buffer of emitted events.
///
/// # Example
///
/// ```
/// use stickbrawl_core::entity::CombatantId;
/// use stickbrawl_core::output::Event;
/// use stickbrawl_core::resolver::EventLog;
///
/// let mut log = EventLog::new();
/// log.record(3, vec![Event::KnockedOut { combatant: CombatantId::One }]);
/// assert_eq!(log.len(), 1);
///
/// let drained = log.take_events();
/// assert_eq!(drained[0].tick, 3);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one tick's events, keeping their order.
    pub fn record(&mut self, tick: u64, events: impl IntoIterator<Item = Event>) {
        self.records
            .extend(events.into_iter().map(|event| EventRecord { tick, event }));
    }

    /// Drains and returns all recorded events in emission order.
    pub fn take_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.records)
    }

    /// Recorded events not yet drained.
    #[must_use]
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Returns the number of events currently in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all events without returning them.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
