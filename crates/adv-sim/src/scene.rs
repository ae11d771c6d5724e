//! The reference scene: applies a tick's intents to the agent store.
//!
//! # Apply rules
//!
//! | Intent             | Effect                                                      |
//! |--------------------|-------------------------------------------------------------|
//! | `MoveToward(p)`    | step `movement_speed * dt` toward `p`, face the movement    |
//! | `FaceToward(p)`    | set heading, remember `p` as the aim point                  |
//! | `Attack`           | damage the live hero standing at the aim point              |
//! | `GenerateSpawn`    | place a goblin at the cave mouth, owned by the cave         |
//! | `Idle`             | nothing                                                     |
//!
//! Intents are applied strictly in the order they were emitted, after every
//! behavior has run.  Agents that started dying during this apply phase skip
//! their remaining intents, and intents of agents no longer in the store are
//! dropped without touching the rest of the tick.

use adv_agent::{AgentKind, AgentSpec, AgentStore, AgentView};
use adv_agent::kind::BASE_MOVEMENT_SPEED;
use adv_behavior::{Intent, TickIntents};
use adv_core::{AdvError, AgentHandle, Point2, SimRng};
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::{SimError, SimResult};

// ── SceneConfig ───────────────────────────────────────────────────────────────

/// Tuning for the reference scene.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Health removed by one `Attack`.
    pub attack_damage: f32,
    /// Goblins one cave may have out at once.
    pub goblin_capacity: usize,
    /// Goblins the whole scene may have allocated at once.
    pub shared_goblin_capacity: usize,
    /// Distance of the cave mouth from the cave centre, as a fraction of the
    /// cave's collision radius.
    pub spawn_offset_factor: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            attack_damage:          5.0,
            goblin_capacity:        5,
            shared_goblin_capacity: 32,
            spawn_offset_factor:    0.75,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.attack_damage.is_finite() && self.attack_damage >= 0.0) {
            return Err(SimError::Config(format!(
                "scene.attack_damage must be a non-negative number, got {}",
                self.attack_damage
            )));
        }
        if !self.spawn_offset_factor.is_finite() {
            return Err(SimError::Config("scene.spawn_offset_factor must be finite".into()));
        }
        if self.goblin_capacity > self.shared_goblin_capacity {
            return Err(SimError::Config(format!(
                "scene.goblin_capacity ({}) exceeds scene.shared_goblin_capacity ({})",
                self.goblin_capacity, self.shared_goblin_capacity
            )));
        }
        Ok(())
    }
}

// ── TickReport ────────────────────────────────────────────────────────────────

/// What the apply phase and reaping did during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Non-idle intents produced by the scheduler.
    pub active_intents: usize,
    /// Agents whose position changed.
    pub moved: usize,
    /// `Attack` intents that hit a hero.
    pub hits: usize,
    /// Goblins generated this tick.
    pub spawned: Vec<AgentHandle>,
    /// `GenerateSpawn` intents refused for lack of capacity.
    pub refused_spawns: usize,
    /// Agents whose health reached zero this tick.
    pub killed: Vec<AgentHandle>,
    /// Agents removed from the store this tick.
    pub despawned: Vec<AgentHandle>,
}

// ── Scene ─────────────────────────────────────────────────────────────────────

/// The scene collaborator.  Owns everything about the world that behaviors
/// never see: aim points, death times, and goblin allocation.
#[derive(Debug, Default)]
pub struct Scene {
    config:           SceneConfig,
    aim:              FxHashMap<AgentHandle, Point2>,
    died_at:          FxHashMap<AgentHandle, f64>,
    shared_allocated: usize,
}

impl Scene {
    /// Create a scene for `agents`, counting goblins already placed by the
    /// level against the shared allocation.
    pub fn new(config: SceneConfig, agents: &AgentStore) -> Self {
        let shared_allocated = agents
            .iter()
            .filter(|a| a.kind == AgentKind::Goblin && a.owner.is_some())
            .count();
        let mut died_at = FxHashMap::default();
        for agent in agents.iter().filter(|a| a.is_dying) {
            died_at.insert(agent.handle, 0.0);
        }
        Self { config, aim: FxHashMap::default(), died_at, shared_allocated }
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Goblins currently allocated scene-wide.
    #[inline]
    pub fn shared_allocated(&self) -> usize {
        self.shared_allocated
    }

    /// The last point `agent` faced, if any.
    pub fn aim_point(&self, agent: AgentHandle) -> Option<Point2> {
        self.aim.get(&agent).copied()
    }

    /// Apply one tick's intents in order.
    ///
    /// `now` is the simulated time at the end of the tick; it stamps deaths
    /// for [`reap`][Self::reap].
    pub fn apply(
        &mut self,
        agents:  &mut AgentStore,
        intents: &TickIntents,
        dt:      f32,
        now:     f64,
        rng:     &mut SimRng,
    ) -> SimResult<TickReport> {
        let mut report = TickReport { active_intents: intents.active_count(), ..TickReport::default() };

        for &(agent, intent) in intents.iter() {
            let Some(view) = agents.get(agent) else {
                trace!(%agent, ?intent, "skipping intent of despawned agent");
                continue;
            };
            if view.is_dying && !intent.is_idle() {
                trace!(%agent, ?intent, "skipping intent of dying agent");
                continue;
            }
            match intent {
                Intent::MoveToward(target) => {
                    if Self::move_toward(agents, &view, target, dt) {
                        report.moved += 1;
                    }
                }
                Intent::FaceToward(target) => {
                    let i = agent.index();
                    if target != view.position {
                        agents.heading[i] = view.position.heading_to(target);
                    }
                    self.aim.insert(agent, target);
                }
                Intent::Attack => {
                    if let Some((victim, killed)) = self.resolve_attack(agents, &view, now)? {
                        report.hits += 1;
                        if killed {
                            report.killed.push(victim);
                        }
                    }
                }
                Intent::GenerateSpawn => match self.spawn_goblin(agents, agent, rng)? {
                    Some(goblin) => report.spawned.push(goblin),
                    None => report.refused_spawns += 1,
                },
                Intent::Idle => {}
            }
        }
        Ok(report)
    }

    fn move_toward(agents: &mut AgentStore, view: &AgentView, target: Point2, dt: f32) -> bool {
        let i = view.handle.index();
        let step = agents.movement_speed[i] * dt;
        let next = view.position.step_toward(target, step);
        if next == view.position {
            return false;
        }
        agents.heading[i] = view.position.heading_to(next);
        agents.position[i] = next;
        true
    }

    /// The live hero closest to the attacker's aim point, if one stands
    /// within its own collision radius of it.
    fn victim_at(agents: &AgentStore, aim: Point2) -> Option<AgentView> {
        agents
            .iter()
            .filter(|a| a.kind.is_hero_like() && !a.is_dying)
            .map(|a| (a.position.distance(aim), a))
            .filter(|(d, a)| *d <= a.collision_radius)
            .fold(None, |best: Option<(f32, AgentView)>, (d, a)| match best {
                Some((bd, _)) if bd <= d => best,
                _ => Some((d, a)),
            })
            .map(|(_, a)| a)
    }

    /// The victim and whether it died, if the attack landed.
    fn resolve_attack(
        &mut self,
        agents:   &mut AgentStore,
        attacker: &AgentView,
        now:      f64,
    ) -> SimResult<Option<(AgentHandle, bool)>> {
        let Some(aim) = self.aim.get(&attacker.handle).copied() else {
            trace!(agent = %attacker.handle, "attack without an aim point");
            return Ok(None);
        };
        let Some(victim) = Self::victim_at(agents, aim) else {
            return Ok(None);
        };
        let damage = self.config.attack_damage;
        debug!(attacker = %attacker.handle, victim = %victim.handle, damage, "attack lands");
        let killed = self.apply_damage(agents, victim.handle, damage, now)?;
        Ok(Some((victim.handle, killed)))
    }

    /// Reduce `agent`'s health by `amount`.
    ///
    /// Returns `true` when this call killed the agent: health is clamped to
    /// zero and `is_dying` set.  Damage to an agent that is already dying is
    /// ignored.
    pub fn apply_damage(
        &mut self,
        agents: &mut AgentStore,
        agent:  AgentHandle,
        amount: f32,
        now:    f64,
    ) -> SimResult<bool> {
        if !agents.contains(agent) {
            return Err(AdvError::AgentNotFound(agent).into());
        }
        let i = agent.index();
        if agents.is_dying[i] {
            return Ok(false);
        }
        agents.health[i] -= amount;
        if agents.health[i] > 0.0 {
            return Ok(false);
        }
        agents.health[i] = 0.0;
        agents.is_dying[i] = true;
        self.died_at.insert(agent, now);
        info!(%agent, kind = %agents.kind[i], "agent killed");
        Ok(true)
    }

    /// Place one goblin at `cave`'s mouth.
    ///
    /// Returns `Ok(None)` when the cave's pool or the shared allocation is
    /// exhausted.
    pub fn spawn_goblin(
        &mut self,
        agents: &mut AgentStore,
        cave:   AgentHandle,
        rng:    &mut SimRng,
    ) -> SimResult<Option<AgentHandle>> {
        let view = agents.get(cave).ok_or(AdvError::AgentNotFound(cave))?;
        let out = agents.owned_by(cave).count();
        if out >= self.config.goblin_capacity {
            warn!(%cave, out, capacity = self.config.goblin_capacity, "spawn refused: cave pool exhausted");
            return Ok(None);
        }
        if self.shared_allocated >= self.config.shared_goblin_capacity {
            warn!(%cave, allocated = self.shared_allocated, "spawn refused: shared goblin capacity reached");
            return Ok(None);
        }

        let heading = agents.heading[cave.index()];
        let mouth = view.position
            + Point2::from_angle(heading) * (view.collision_radius * self.config.spawn_offset_factor);
        let spec = AgentSpec::new(AgentKind::Goblin, mouth)
            .heading(heading)
            .movement_speed(BASE_MOVEMENT_SPEED * rng.unit_random())
            .owner(cave);
        let goblin = agents.insert(spec);
        self.shared_allocated += 1;
        debug!(%cave, %goblin, position = %mouth, "goblin spawned");
        Ok(Some(goblin))
    }

    /// Despawn every dying agent whose corpse has lingered long enough.
    ///
    /// Caves are never reaped; a destroyed cave stays as wreckage.
    pub fn reap(&mut self, agents: &mut AgentStore, now: f64) -> Vec<AgentHandle> {
        let due: Vec<AgentHandle> = self
            .died_at
            .iter()
            .filter_map(|(&agent, &died)| {
                let kind = agents.get(agent)?.kind;
                let linger = f64::from(kind.corpse_linger_secs()?);
                (now - died >= linger).then_some(agent)
            })
            .collect();

        let mut removed = Vec::with_capacity(due.len());
        for agent in due {
            if self.despawn(agents, agent).is_ok() {
                removed.push(agent);
            }
        }
        // Deterministic output regardless of hash order.
        removed.sort_unstable();
        self.died_at.retain(|agent, _| agents.contains(*agent));
        removed
    }

    /// Remove `agent` from the world immediately.
    pub fn despawn(&mut self, agents: &mut AgentStore, agent: AgentHandle) -> SimResult<AgentView> {
        let view = agents.remove(agent).ok_or(AdvError::AgentNotFound(agent))?;
        self.aim.remove(&agent);
        self.died_at.remove(&agent);
        if view.kind == AgentKind::Goblin && view.owner.is_some() {
            self.shared_allocated = self.shared_allocated.saturating_sub(1);
        }
        info!(%agent, kind = %view.kind, "agent despawned");
        Ok(view)
    }
}
