//! Spawn: throttled goblin generation from a cave.
//!
//! Rules, first match wins:
//!
//! 1. Cave destroyed (`health <= 0`) → `Idle`, forever.
//! 2. No goblins out → `GenerateSpawn`, cooldown = base.
//! 3. Cooldown elapsed and room under the limit → `GenerateSpawn`,
//!    cooldown = base.
//! 4. Room under the limit and the nearest visible hero is closer than
//!    `threshold * world_size` → `GenerateSpawn`, cooldown =
//!    `distance_scale * base` (a closer hero means a shorter wait).  Heroes
//!    behind walls are ignored, so a hidden hero never shadows a visible one.
//! 5. Otherwise the cooldown runs down by the tick's delta → `Idle`.

use adv_core::AgentHandle;
use tracing::{debug, trace};

use crate::{BehaviorModel, Intent, SimContext, SpawnConfig};

/// Per-cave spawn throttle.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnBehavior {
    config:   SpawnConfig,
    cooldown: f32,
}

impl SpawnBehavior {
    pub fn new(config: SpawnConfig) -> Self {
        Self { cooldown: config.base_regenerate_cooldown, config }
    }

    /// Seconds until the next unconditional generation.
    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Override the cooldown (level scripting, tests).
    pub fn set_cooldown(&mut self, seconds: f32) {
        self.cooldown = seconds;
    }

    #[inline]
    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    fn generate(&mut self, agent: AgentHandle, next_cooldown: f32, reason: &'static str) -> Vec<Intent> {
        debug!(%agent, reason, next_cooldown, "cave generates a spawn");
        self.cooldown = next_cooldown;
        vec![Intent::GenerateSpawn]
    }
}

impl BehaviorModel for SpawnBehavior {
    fn update(&mut self, agent: AgentHandle, ctx: &SimContext<'_>) -> Vec<Intent> {
        let Some(cave) = ctx.agents.get(agent) else {
            return vec![Intent::Idle];
        };
        if cave.health <= 0.0 {
            return vec![Intent::Idle];
        }

        let base = self.config.base_regenerate_cooldown;
        let limit = self.config.active_spawn_limit;
        let active = ctx.census.active(agent);

        if active == 0 {
            return self.generate(agent, base, "empty");
        }
        if self.cooldown <= 0.0 && active < limit {
            return self.generate(agent, base, "cooldown");
        }

        let distance = ctx
            .heroes()
            .filter(|hero| ctx.can_see(hero.position, cave.position))
            .map(|hero| cave.position.distance(hero.position))
            .fold(f32::INFINITY, f32::min);
        let distance_scale = distance / self.config.world_size;

        if active < limit
            && distance_scale < self.config.proximity_distance_scale_threshold
            && self.cooldown > 0.0
        {
            return self.generate(agent, distance_scale * base, "proximity");
        }

        self.cooldown = (self.cooldown - ctx.time_delta).max(0.0);
        trace!(%agent, active, cooldown = self.cooldown, "cave waiting");
        vec![Intent::Idle]
    }
}
