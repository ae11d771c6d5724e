//! Simulation observer trait for progress reporting and data collection.

use adv_agent::AgentStore;
use adv_behavior::TickIntents;
use adv_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: kill counter
///
/// ```rust,ignore
/// struct KillCounter(usize);
///
/// impl SimObserver for KillCounter {
///     fn on_tick_end(&mut self, _tick: Tick, report: &TickReport, _agents: &AgentStore) {
///         self.0 += report.killed.len();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the intent phase, before any intent is applied.
    fn on_intents(&mut self, _tick: Tick, _intents: &TickIntents) {}

    /// Called at the end of each tick with what the scene did and the
    /// post-tick world.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _agents: &AgentStore) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
