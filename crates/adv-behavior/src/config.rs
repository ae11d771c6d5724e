//! Tunable behavior parameters.
//!
//! The defaults reproduce the game's shipped tuning.  Every threshold is
//! exposed here instead of as a module constant so levels (and tests) can
//! retune them; `validate` rejects values that would make the state
//! machines meaningless.

use crate::{BehaviorError, BehaviorResult};

/// Chase-and-attack radii, as multiples of the controller's collision radius.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// 500x the collision radius: enemies notice a hero almost anywhere.
    pub alert_radius_factor: f32,
    /// Approximates arm reach relative to torso size.
    pub attack_radius_factor: f32,
    /// Bosses have longer arms.
    pub boss_attack_radius_factor: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            alert_radius_factor:       500.0,
            attack_radius_factor:      2.0,
            boss_attack_radius_factor: 4.0,
        }
    }
}

/// Cave spawning throttle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnConfig {
    /// Maximum goblins a cave keeps out at once.
    pub active_spawn_limit: usize,
    /// Seconds between generations when no hero is close.
    pub base_regenerate_cooldown: f32,
    /// Heroes nearer than this fraction of `world_size` speed spawning up.
    pub proximity_distance_scale_threshold: f32,
    /// Edge length of the world, used to normalise hero distance.
    pub world_size: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            active_spawn_limit:                 5,
            base_regenerate_cooldown:           4.0,
            proximity_distance_scale_threshold: 0.24,
            world_size:                         4096.0,
        }
    }
}

/// All behavior tuning, passed to the scheduler at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    pub chase: ChaseConfig,
    pub spawn: SpawnConfig,
}

impl BehaviorConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        positive("chase.alert_radius_factor", self.chase.alert_radius_factor)?;
        positive("chase.attack_radius_factor", self.chase.attack_radius_factor)?;
        positive("chase.boss_attack_radius_factor", self.chase.boss_attack_radius_factor)?;
        positive("spawn.base_regenerate_cooldown", self.spawn.base_regenerate_cooldown)?;
        positive("spawn.world_size", self.spawn.world_size)?;
        let threshold = self.spawn.proximity_distance_scale_threshold;
        if threshold.is_nan() || threshold < 0.0 {
            return Err(BehaviorError::Config(format!(
                "spawn.proximity_distance_scale_threshold must be >= 0, got {threshold}"
            )));
        }
        if self.spawn.active_spawn_limit == 0 {
            return Err(BehaviorError::Config(
                "spawn.active_spawn_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> BehaviorResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(BehaviorError::Config(format!("{name} must be a positive number, got {value}")))
    }
}
