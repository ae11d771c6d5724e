//! Simulation time model.
//!
//! # Design
//!
//! Ticks are counted with a monotonically increasing `Tick`.  Unlike a fixed
//! step simulation, each tick carries its own elapsed time (the frame delta
//! the external clock reports), so `SimClock` accumulates seconds alongside
//! the tick counter.
//!
//! Deltas longer than one second (a stalled frame, a debugger pause) are
//! replaced by the minimum update interval so behaviors never see a huge
//! jump in cooldowns or movement.

use std::fmt;

/// Deltas above this are treated as stalls.
pub const MAX_FRAME_DELTA_SECS: f32 = 1.0;

/// The delta substituted for a stalled frame (one 60 Hz frame).
pub const MIN_UPDATE_INTERVAL_SECS: f32 = 1.0 / 60.0;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and total simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by [`SimClock::advance`].
    pub current_tick: Tick,
    /// Simulated seconds elapsed since tick 0.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The delta a tick should actually use for a raw frame delta.
    ///
    /// Negative or non-finite deltas count as zero; stalls (deltas above
    /// [`MAX_FRAME_DELTA_SECS`]) become [`MIN_UPDATE_INTERVAL_SECS`].
    #[inline]
    pub fn effective_delta(raw_delta: f32) -> f32 {
        if !raw_delta.is_finite() || raw_delta < 0.0 {
            0.0
        } else if raw_delta > MAX_FRAME_DELTA_SECS {
            MIN_UPDATE_INTERVAL_SECS
        } else {
            raw_delta
        }
    }

    /// Advance by one tick that lasted `delta` seconds.
    #[inline]
    pub fn advance(&mut self, delta: f32) {
        self.current_tick = Tick(self.current_tick.0 + 1);
        self.elapsed_secs += f64::from(delta);
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Seconds fed to every tick by the fixed-step runner (`Sim::run`).
    pub tick_delta_secs: f32,

    /// Total ticks to simulate.
    pub total_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:            42,
            tick_delta_secs: MIN_UPDATE_INTERVAL_SECS,
            total_ticks:     60 * 60,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}
