//! The behavior scheduler: one controller per agent, run in creation order.

use adv_agent::AgentStore;
use adv_behavior::{Behavior, BehaviorConfig, BehaviorModel, SimContext, SpawnCensus, TickIntents};
use adv_core::{AgentHandle, Tick};
use adv_spatial::LineOfSight;
use tracing::{debug, trace};

/// Holds every registered behavior, keyed by the agent it controls.
///
/// Entries keep the order in which they were registered; that order is the
/// order intents appear in a tick's output.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    config:  BehaviorConfig,
    entries: Vec<(AgentHandle, Behavior)>,
}

impl Scheduler {
    pub fn new(config: BehaviorConfig) -> Self {
        Self { config, entries: Vec::new() }
    }

    #[inline]
    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attach `behavior` to `agent`.
    ///
    /// Replaces (in place, keeping its position) any behavior the agent
    /// already had.
    pub fn register(&mut self, agent: AgentHandle, behavior: Behavior) {
        match self.entries.iter_mut().find(|(a, _)| *a == agent) {
            Some((_, existing)) => *existing = behavior,
            None => self.entries.push((agent, behavior)),
        }
    }

    /// Register the default behavior for `agent`'s kind.
    ///
    /// Returns `false` for stale handles, for agents that already have a
    /// behavior, and for kinds with no behavior (heroes).
    pub fn adopt(&mut self, agents: &AgentStore, agent: AgentHandle) -> bool {
        if self.contains(agent) {
            return false;
        }
        let Some(view) = agents.get(agent) else {
            return false;
        };
        match Behavior::for_agent(&view, &self.config) {
            Some(behavior) => {
                self.entries.push((agent, behavior));
                true
            }
            None => false,
        }
    }

    /// Adopt every live agent in scan order.  Returns how many were added.
    pub fn adopt_all(&mut self, agents: &AgentStore) -> usize {
        let handles: Vec<AgentHandle> = agents.iter().map(|a| a.handle).collect();
        handles.into_iter().filter(|&h| self.adopt(agents, h)).count()
    }

    pub fn unregister(&mut self, agent: AgentHandle) -> Option<Behavior> {
        let pos = self.entries.iter().position(|(a, _)| *a == agent)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, agent: AgentHandle) -> bool {
        self.entries.iter().any(|(a, _)| *a == agent)
    }

    pub fn behavior(&self, agent: AgentHandle) -> Option<&Behavior> {
        self.entries.iter().find(|(a, _)| *a == agent).map(|(_, b)| b)
    }

    pub fn behavior_mut(&mut self, agent: AgentHandle) -> Option<&mut Behavior> {
        self.entries.iter_mut().find(|(a, _)| *a == agent).map(|(_, b)| b)
    }

    /// Controllers in run order.
    pub fn iter(&self) -> impl Iterator<Item = &(AgentHandle, Behavior)> {
        self.entries.iter()
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one tick of every behavior against the pre-tick `agents`.
    ///
    /// Controllers whose agent no longer exists are dropped and stale
    /// targets are cleared before any behavior runs.  `agents` is borrowed
    /// immutably for the whole call: nothing here changes the world.
    pub fn tick(
        &mut self,
        agents:     &AgentStore,
        sight:      Option<&dyn LineOfSight>,
        tick:       Tick,
        time_delta: f32,
    ) -> TickIntents {
        let before = self.entries.len();
        self.entries.retain(|(agent, _)| agents.contains(*agent));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            debug!(%tick, dropped, "dropped controllers of despawned agents");
        }

        for (agent, behavior) in &mut self.entries {
            if behavior.forget_stale_target(agents) {
                trace!(%tick, %agent, "cleared stale target");
            }
        }

        let census = SpawnCensus::build(agents);
        let ctx = SimContext::new(tick, time_delta, agents, sight, &census);

        let mut out = TickIntents::new(tick);
        for (agent, behavior) in &mut self.entries {
            for intent in behavior.update(*agent, &ctx) {
                out.push(*agent, intent);
            }
        }
        trace!(%tick, controllers = self.entries.len(), active = out.active_count(), "intent phase done");
        out
    }
}
