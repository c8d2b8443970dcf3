//! Fixed-timestep clock.
//!
//! Every rule in the simulation is expressed per tick, so game speed follows
//! the tick rate, not wall time. Hosts that get a measured frame delta rather
//! than a fixed refresh signal feed it to [`FixedTimestep::advance`], which
//! returns how many ticks to run this frame.
//!
//! Backlog is bounded: frame deltas are clamped to [`MAX_FRAME_DELTA`] and at
//! most `max_ticks_per_frame` ticks run per frame. Time that still does not
//! fit is dropped rather than carried into later frames.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use stickbrawl_core::clock::FixedTimestep;
//!
//! let mut clock = FixedTimestep::default();
//! assert_eq!(clock.advance(Duration::from_millis(8)), 0);
//! assert_eq!(clock.advance(Duration::from_millis(9)), 1);
//! ```

use std::time::Duration;

use tracing::warn;

/// Nominal time step (1/60 second = ~16.67ms).
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Default tick rate in ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 60;

/// Default cap on ticks run for a single frame.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 5;

/// Longest frame delta accepted before clamping.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Accumulates frame time and hands out whole ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE, DEFAULT_MAX_TICKS_PER_FRAME)
    }
}

impl FixedTimestep {
    /// Creates a clock. Zero arguments are treated as one.
    #[must_use]
    pub fn new(tick_rate: u32, max_ticks_per_frame: u32) -> Self {
        let tick_rate = tick_rate.max(1);
        Self {
            step: Duration::from_nanos(1_000_000_000 / u64::from(tick_rate)),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Adds a frame's elapsed time and returns the ticks to run now.
    pub fn advance(&mut self, frame_delta: Duration) -> u32 {
        self.accumulator = self
            .accumulator
            .saturating_add(frame_delta.min(MAX_FRAME_DELTA));

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if self.accumulator >= self.step {
            warn!(
                dropped_ms = self.accumulator.as_secs_f64() * 1000.0,
                max_ticks_per_frame = self.max_ticks_per_frame,
                "tick backlog dropped"
            );
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, in `[0, 1)`.
    ///
    /// Renderers interpolate between `previous_position` and `position`
    /// with this.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn alpha(&self) -> f32 {
        (self.accumulator.as_secs_f64() / self.step.as_secs_f64()) as f32
    }

    /// Discards accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
