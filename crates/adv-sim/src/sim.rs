//! The `Sim` struct and its tick loop.

use adv_agent::{AgentSpec, AgentStore};
use adv_core::{AgentHandle, SimClock, SimConfig, SimRng, Tick};
use adv_spatial::LineOfSight;
use tracing::info;

use crate::{Scene, Scheduler, SimObserver, SimResult, TickReport};

/// The main simulation runner.
///
/// Each tick runs in a fixed order:
///
/// 1. **Intent phase**: the [`Scheduler`] drops controllers of despawned
///    agents, clears stale targets and runs every behavior against the
///    pre-tick store.
/// 2. **Apply phase**: the [`Scene`] applies the intents in emission order.
///    Newly generated goblins get a behavior immediately; they first act on
///    the next tick.
/// 3. **Reap**: corpses whose linger time has elapsed are despawned.
/// 4. **Clock**: the tick counter and elapsed seconds advance.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration (seed, fixed tick delta, total ticks).
    pub config: SimConfig,

    /// Current tick and simulated seconds.
    pub clock: SimClock,

    /// Every agent in the scene.  Mutated only between ticks and by the
    /// scene during the apply phase.
    pub agents: AgentStore,

    /// Controllers in creation order.
    pub scheduler: Scheduler,

    /// Intent application, damage, spawning and reaping.
    pub scene: Scene,

    /// Visibility collaborator.  `None` means nothing is visible.
    pub sight: Option<Box<dyn LineOfSight>>,

    /// Scene-level randomness (goblin speeds).
    pub rng: SimRng,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run with the fixed `config.tick_delta_secs` from the current tick to
    /// `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let dt = self.config.tick_delta_secs;
        while self.clock.current_tick < self.config.end_tick() {
            self.step(dt, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick, &self.agents);
        info!(
            tick = %self.clock.current_tick,
            elapsed_secs = self.clock.elapsed_secs,
            agents = self.agents.len(),
            goblins = self.scene.shared_allocated(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` fixed-delta ticks from the current position (ignores
    /// `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        let dt = self.config.tick_delta_secs;
        for _ in 0..n {
            self.step(dt, observer)?;
        }
        Ok(())
    }

    /// Run one tick that lasted `raw_delta` seconds of frame time.
    ///
    /// The delta is sanitised first: stalls longer than a second are
    /// replaced with one 60 Hz frame.
    pub fn step<O: SimObserver>(&mut self, raw_delta: f32, observer: &mut O) -> SimResult<TickReport> {
        let dt = SimClock::effective_delta(raw_delta);
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let report = self.process_tick(now, dt, observer)?;
        observer.on_tick_end(now, &report, &self.agents);
        self.clock.advance(dt);
        Ok(report)
    }

    /// Insert a new agent between ticks and give it its default behavior.
    pub fn spawn(&mut self, spec: AgentSpec) -> AgentHandle {
        let agent = self.agents.insert(spec);
        self.scheduler.adopt(&self.agents, agent);
        agent
    }

    /// Damage an agent between ticks (hero attacks, traps, scripted events).
    ///
    /// Returns `true` if the blow killed it.
    pub fn damage(&mut self, agent: AgentHandle, amount: f32) -> SimResult<bool> {
        let now = self.clock.elapsed_secs;
        self.scene.apply_damage(&mut self.agents, agent, amount, now)
    }

    /// Remove an agent immediately.
    pub fn despawn(&mut self, agent: AgentHandle) -> SimResult<()> {
        self.scene.despawn(&mut self.agents, agent)?;
        self.scheduler.unregister(agent);
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, dt: f32, observer: &mut O) -> SimResult<TickReport> {
        let intents = self.scheduler.tick(&self.agents, self.sight.as_deref(), now, dt);
        observer.on_intents(now, &intents);

        let end_secs = self.clock.elapsed_secs + f64::from(dt);
        let mut report = self.scene.apply(&mut self.agents, &intents, dt, end_secs, &mut self.rng)?;
        for &goblin in &report.spawned {
            self.scheduler.adopt(&self.agents, goblin);
        }

        report.despawned = self.scene.reap(&mut self.agents, end_secs);
        Ok(report)
    }
}
