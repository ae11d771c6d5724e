//! Chase-and-attack: find the closest visible hero, walk to it, hit it.
//!
//! # States
//!
//! | State       | Condition                                   | Intents                   |
//! |-------------|---------------------------------------------|---------------------------|
//! | `Idle`      | dying, or no visible hero in alert radius   | `Idle`                    |
//! | `Chasing`   | target farther than `attack_radius`         | `MoveToward`              |
//! | `Attacking` | target at or within `attack_radius`         | `FaceToward`, `Attack`    |
//!
//! Target selection scans heroes in store order and keeps the strictly
//! closest one that is inside the alert radius *and* visible; a hero behind
//! a wall is skipped outright, never merely ranked lower.

use adv_agent::AgentView;
use adv_core::AgentHandle;
use tracing::debug;

use crate::{BehaviorModel, ChaseConfig, Intent, SimContext};

/// Logical state after the most recent update.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ChaseState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Per-enemy chase state machine.
#[derive(Clone, Debug, PartialEq)]
pub struct ChaseBehavior {
    /// Heroes at or beyond this distance are ignored.
    pub alert_radius:  f32,
    /// Distance at which chasing turns into attacking (inclusive).
    pub attack_radius: f32,
    target: Option<AgentHandle>,
    state:  ChaseState,
}

impl ChaseBehavior {
    pub fn new(alert_radius: f32, attack_radius: f32) -> Self {
        Self { alert_radius, attack_radius, target: None, state: ChaseState::Idle }
    }

    /// Radii derived from the controller's collision radius.
    pub fn with_factors(collision_radius: f32, alert_factor: f32, attack_factor: f32) -> Self {
        Self::new(collision_radius * alert_factor, collision_radius * attack_factor)
    }

    /// Standard enemy tuning.
    pub fn from_config(collision_radius: f32, config: &ChaseConfig) -> Self {
        Self::with_factors(collision_radius, config.alert_radius_factor, config.attack_radius_factor)
    }

    /// Boss tuning: same alert radius, longer reach.
    pub fn boss_from_config(collision_radius: f32, config: &ChaseConfig) -> Self {
        Self::with_factors(
            collision_radius,
            config.alert_radius_factor,
            config.boss_attack_radius_factor,
        )
    }

    #[inline]
    pub fn state(&self) -> ChaseState {
        self.state
    }

    /// The closest visible hero within the alert radius, with its distance.
    pub fn closest_visible_hero(
        &self,
        me:  &AgentView,
        ctx: &SimContext<'_>,
    ) -> Option<(f32, AgentView)> {
        let mut best: Option<(f32, AgentView)> = None;
        for hero in ctx.heroes() {
            let distance = me.position.distance(hero.position);
            if distance >= self.alert_radius {
                continue;
            }
            if best.is_some_and(|(d, _)| distance >= d) {
                continue;
            }
            if !ctx.can_see(hero.position, me.position) {
                continue;
            }
            best = Some((distance, hero));
        }
        best
    }

    fn go_idle(&mut self, agent: AgentHandle) -> Vec<Intent> {
        self.target = None;
        self.transition(agent, ChaseState::Idle);
        vec![Intent::Idle]
    }

    fn transition(&mut self, agent: AgentHandle, next: ChaseState) {
        if self.state != next {
            debug!(%agent, from = ?self.state, to = ?next, target = ?self.target, "chase state change");
            self.state = next;
        }
    }
}

impl BehaviorModel for ChaseBehavior {
    fn update(&mut self, agent: AgentHandle, ctx: &SimContext<'_>) -> Vec<Intent> {
        let Some(me) = ctx.agents.get(agent) else {
            return self.go_idle(agent);
        };
        if me.is_dying {
            return self.go_idle(agent);
        }

        let Some((distance, hero)) = self.closest_visible_hero(&me, ctx) else {
            return self.go_idle(agent);
        };

        self.target = Some(hero.handle);
        if distance > self.attack_radius {
            self.transition(agent, ChaseState::Chasing);
            vec![Intent::MoveToward(hero.position)]
        } else {
            self.transition(agent, ChaseState::Attacking);
            vec![Intent::FaceToward(hero.position), Intent::Attack]
        }
    }

    fn target(&self) -> Option<AgentHandle> {
        self.target
    }

    fn clear_target(&mut self) {
        self.target = None;
    }
}
