//! Read-only simulation state passed to every behavior update.

use adv_agent::{AgentStore, AgentView};
use adv_core::{AgentHandle, Point2, Tick};
use adv_spatial::LineOfSight;
use rustc_hash::FxHashMap;

// ── SpawnCensus ───────────────────────────────────────────────────────────────

/// Number of live agents each spawner currently owns.
///
/// Built once per tick from the store so every cave answers "how many of my
/// goblins are out?" in O(1).  Dying goblins still count until the scene
/// despawns them.
#[derive(Debug, Clone, Default)]
pub struct SpawnCensus {
    active: FxHashMap<AgentHandle, usize>,
}

impl SpawnCensus {
    pub fn build(agents: &AgentStore) -> Self {
        let mut active: FxHashMap<AgentHandle, usize> = FxHashMap::default();
        for agent in agents.iter() {
            if let Some(owner) = agent.owner {
                *active.entry(owner).or_default() += 1;
            }
        }
        Self { active }
    }

    /// Live agents owned by `spawner`.
    #[inline]
    pub fn active(&self, spawner: AgentHandle) -> usize {
        self.active.get(&spawner).copied().unwrap_or(0)
    }
}

// ── SimContext ────────────────────────────────────────────────────────────────

/// A read-only snapshot of the world shared by every behavior in one tick.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's intent phase.  The
/// scheduler never allows mutable access to the store while a
/// `SimContext` is live, which is what makes every decision in a tick see
/// the same pre-tick positions.
pub struct SimContext<'a> {
    /// Tick being evaluated.
    pub tick: Tick,

    /// Seconds elapsed since the previous tick.
    pub time_delta: f32,

    /// Every agent's public state.
    pub agents: &'a AgentStore,

    /// Visibility collaborator.  `None` means nothing is visible.
    pub sight: Option<&'a dyn LineOfSight>,

    /// Per-spawner active counts.
    pub census: &'a SpawnCensus,
}

impl<'a> SimContext<'a> {
    #[inline]
    pub fn new(
        tick:       Tick,
        time_delta: f32,
        agents:     &'a AgentStore,
        sight:      Option<&'a dyn LineOfSight>,
        census:     &'a SpawnCensus,
    ) -> Self {
        Self { tick, time_delta, agents, sight, census }
    }

    /// Can an observer standing at `from` see `point`?
    #[inline]
    pub fn can_see(&self, point: Point2, from: Point2) -> bool {
        self.sight.is_some_and(|s| s.can_see(point, from))
    }

    /// Hero-like agents that are not dying, in scan order.
    pub fn heroes(&self) -> impl Iterator<Item = AgentView> + 'a {
        self.agents
            .iter()
            .filter(|a| a.kind.is_hero_like() && !a.is_dying)
    }
}
