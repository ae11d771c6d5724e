//! The `BehaviorModel` trait and the closed `Behavior` enum the scheduler
//! stores.

use adv_agent::{AgentKind, AgentStore, AgentView};
use adv_core::AgentHandle;

use crate::{BehaviorConfig, ChaseBehavior, Intent, SimContext, SpawnBehavior};

/// Per-agent decision logic.
///
/// Implementations own their state (a target, a cooldown) and update it in
/// place; the world is only ever read through the [`SimContext`].
///
/// # Required methods
///
/// Only [`update`][Self::update] is required.  Behaviors that track another
/// agent override [`target`][Self::target] and
/// [`clear_target`][Self::clear_target] so the scheduler can drop stale
/// handles before the next update.
pub trait BehaviorModel {
    /// Called once per tick for the controlling `agent`.
    ///
    /// Must return at least one intent; `Idle` means "do nothing".
    fn update(&mut self, agent: AgentHandle, ctx: &SimContext<'_>) -> Vec<Intent>;

    /// The agent this behavior is currently tracking, if any.
    fn target(&self) -> Option<AgentHandle> {
        None
    }

    /// Forget the current target.
    fn clear_target(&mut self) {}

    /// Clear the target if it no longer resolves in `agents`.
    ///
    /// Returns `true` if a stale target was dropped.
    fn forget_stale_target(&mut self, agents: &AgentStore) -> bool {
        match self.target() {
            Some(target) if !agents.contains(target) => {
                self.clear_target();
                true
            }
            _ => false,
        }
    }
}

/// Every behavior the simulation knows about.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    Chase(ChaseBehavior),
    Spawn(SpawnBehavior),
}

impl Behavior {
    /// The behavior an agent of this kind runs, or `None` for agents driven
    /// from outside (player-controlled heroes).
    ///
    /// Spawners get [`SpawnBehavior`]; every other non-hero chases, with the
    /// boss using its longer reach.
    pub fn for_agent(agent: &AgentView, config: &BehaviorConfig) -> Option<Behavior> {
        if agent.kind.is_hero_like() {
            return None;
        }
        if agent.kind.is_spawner() {
            return Some(Behavior::Spawn(SpawnBehavior::new(config.spawn)));
        }
        let chase = match agent.kind {
            AgentKind::Boss => {
                ChaseBehavior::boss_from_config(agent.collision_radius, &config.chase)
            }
            _ => ChaseBehavior::from_config(agent.collision_radius, &config.chase),
        };
        Some(Behavior::Chase(chase))
    }

    pub fn as_chase(&self) -> Option<&ChaseBehavior> {
        match self {
            Behavior::Chase(c) => Some(c),
            Behavior::Spawn(_) => None,
        }
    }

    pub fn as_spawn(&self) -> Option<&SpawnBehavior> {
        match self {
            Behavior::Spawn(s) => Some(s),
            Behavior::Chase(_) => None,
        }
    }
}

impl BehaviorModel for Behavior {
    fn update(&mut self, agent: AgentHandle, ctx: &SimContext<'_>) -> Vec<Intent> {
        match self {
            Behavior::Chase(c) => c.update(agent, ctx),
            Behavior::Spawn(s) => s.update(agent, ctx),
        }
    }

    fn target(&self) -> Option<AgentHandle> {
        match self {
            Behavior::Chase(c) => c.target(),
            Behavior::Spawn(s) => s.target(),
        }
    }

    fn clear_target(&mut self) {
        match self {
            Behavior::Chase(c) => c.clear_target(),
            Behavior::Spawn(s) => s.clear_target(),
        }
    }
}

impl From<ChaseBehavior> for Behavior {
    fn from(c: ChaseBehavior) -> Self {
        Behavior::Chase(c)
    }
}

impl From<SpawnBehavior> for Behavior {
    fn from(s: SpawnBehavior) -> Self {
        Behavior::Spawn(s)
    }
}
