//! Agent intents — what a behavior asks the scene to do this tick.

use adv_core::{AgentHandle, Point2, Tick};

/// A declarative outcome of one behavior update.
///
/// Intents are produced by [`BehaviorModel::update`][crate::BehaviorModel::update]
/// and consumed by the scene collaborator after every behavior has run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Walk toward a point at the agent's movement speed.
    MoveToward(Point2),

    /// Turn to face a point.  Precedes [`Intent::Attack`].
    FaceToward(Point2),

    /// Swing at whatever the agent is facing.
    Attack,

    /// Generate one new agent from this spawner.
    GenerateSpawn,

    /// Nothing to do this tick.
    Idle,
}

impl Intent {
    pub fn is_idle(&self) -> bool {
        matches!(self, Intent::Idle)
    }
}

/// The ordered output of one tick: `(agent, intent)` pairs in the order the
/// behaviors ran.  An agent that emits several intents appears once per
/// intent, consecutively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickIntents {
    pub tick:    Tick,
    pub entries: Vec<(AgentHandle, Intent)>,
}

impl TickIntents {
    pub fn new(tick: Tick) -> Self {
        Self { tick, entries: Vec::new() }
    }

    pub fn push(&mut self, agent: AgentHandle, intent: Intent) {
        self.entries.push((agent, intent));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AgentHandle, Intent)> {
        self.entries.iter()
    }

    /// Intents emitted by one agent, in order.
    pub fn for_agent(&self, agent: AgentHandle) -> Vec<Intent> {
        self.entries
            .iter()
            .filter(|(a, _)| *a == agent)
            .map(|(_, i)| *i)
            .collect()
    }

    /// Number of non-idle intents.
    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|(_, i)| !i.is_idle()).count()
    }
}

impl IntoIterator for TickIntents {
    type Item = (AgentHandle, Intent);
    type IntoIter = std::vec::IntoIter<(AgentHandle, Intent)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
