//! `AgentStore` — a generational Structure-of-Arrays arena.
//!
//! Every `Vec` field has one element per slot; `AgentId` is the index into
//! all of them.  A slot is either live or free.  Freed slots are reused by
//! later inserts, and every reuse bumps the slot's generation so handles to
//! the previous occupant stop resolving:
//!
//! ```ignore
//! let goblin = store.insert(spec);
//! store.remove(goblin);
//! let cave_spawn = store.insert(other_spec);   // same slot, generation + 1
//! assert!(store.get(goblin).is_none());
//! ```
//!
//! The data arrays are `pub` for cheap indexed reads and for the scene's
//! apply phase.  Writers must check [`AgentStore::contains`] first; the
//! contents of a free slot are meaningless.

use adv_core::{AgentHandle, AgentId, Point2};

use crate::{AgentKind, AgentSpec};

/// A copy of one live agent's public state.
///
/// Behaviors read the world exclusively through these snapshots.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentView {
    pub handle:           AgentHandle,
    pub kind:             AgentKind,
    pub position:         Point2,
    pub collision_radius: f32,
    pub health:           f32,
    pub is_dying:         bool,
    pub owner:            Option<AgentHandle>,
}

/// Generational arena of agent state.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    // ── Agent state ───────────────────────────────────────────────────────
    pub kind:             Vec<AgentKind>,
    pub position:         Vec<Point2>,
    pub collision_radius: Vec<f32>,
    pub health:           Vec<f32>,
    pub is_dying:         Vec<bool>,
    pub movement_speed:   Vec<f32>,
    /// Facing angle in radians.
    pub heading:          Vec<f32>,
    /// Spawner that generated the agent, if any.
    pub owner:            Vec<Option<AgentHandle>>,

    // ── Slot bookkeeping ──────────────────────────────────────────────────
    generation: Vec<u32>,
    live:       Vec<bool>,
    free:       Vec<AgentId>,
    live_count: usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.live_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Number of slots ever allocated (live + free).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.generation.len()
    }

    /// Insert a new agent, reusing a free slot when one exists.
    pub fn insert(&mut self, spec: AgentSpec) -> AgentHandle {
        if let Some(id) = self.free.pop() {
            let i = id.index();
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.live[i] = true;
            self.kind[i] = spec.kind;
            self.position[i] = spec.position;
            self.collision_radius[i] = spec.collision_radius;
            self.health[i] = spec.health;
            self.is_dying[i] = false;
            self.movement_speed[i] = spec.movement_speed;
            self.heading[i] = spec.heading;
            self.owner[i] = spec.owner;
            self.live_count += 1;
            return AgentHandle::new(id, self.generation[i]);
        }

        let id = AgentId(self.generation.len() as u32);
        self.kind.push(spec.kind);
        self.position.push(spec.position);
        self.collision_radius.push(spec.collision_radius);
        self.health.push(spec.health);
        self.is_dying.push(false);
        self.movement_speed.push(spec.movement_speed);
        self.heading.push(spec.heading);
        self.owner.push(spec.owner);
        self.generation.push(0);
        self.live.push(true);
        self.live_count += 1;
        AgentHandle::new(id, 0)
    }

    /// Remove an agent.  Returns its final snapshot, or `None` if the handle
    /// was already stale.
    pub fn remove(&mut self, handle: AgentHandle) -> Option<AgentView> {
        let view = self.get(handle)?;
        self.live[handle.index()] = false;
        self.free.push(handle.id);
        self.live_count -= 1;
        Some(view)
    }

    /// `true` if `handle` refers to a live agent.
    #[inline]
    pub fn contains(&self, handle: AgentHandle) -> bool {
        let i = handle.index();
        i < self.live.len() && self.live[i] && self.generation[i] == handle.generation
    }

    /// The current handle of the agent in slot `id`, if the slot is live.
    #[inline]
    pub fn handle_at(&self, id: AgentId) -> Option<AgentHandle> {
        let i = id.index();
        (i < self.live.len() && self.live[i]).then(|| AgentHandle::new(id, self.generation[i]))
    }

    /// Snapshot of one agent, or `None` if the handle is stale.
    pub fn get(&self, handle: AgentHandle) -> Option<AgentView> {
        self.contains(handle).then(|| self.view_at(handle))
    }

    /// Live agents in ascending slot order.
    ///
    /// This is the deterministic scan order behaviors use for tie-breaking.
    pub fn iter(&self) -> impl Iterator<Item = AgentView> + '_ {
        (0..self.generation.len() as u32)
            .filter_map(|i| self.handle_at(AgentId(i)))
            .map(|h| self.view_at(h))
    }

    /// Live agents whose `owner` is `spawner`.
    pub fn owned_by(&self, spawner: AgentHandle) -> impl Iterator<Item = AgentView> + '_ {
        self.iter().filter(move |a| a.owner == Some(spawner))
    }

    fn view_at(&self, handle: AgentHandle) -> AgentView {
        let i = handle.index();
        AgentView {
            handle,
            kind:             self.kind[i],
            position:         self.position[i],
            collision_radius: self.collision_radius[i],
            health:           self.health[i],
            is_dying:         self.is_dying[i],
            owner:            self.owner[i],
        }
    }
}
