//! Fluent builder for constructing a [`Sim`].

use adv_agent::AgentStore;
use adv_behavior::BehaviorConfig;
use adv_core::{SimClock, SimConfig, SimRng};
use adv_spatial::LineOfSight;
use tracing::debug;

use crate::{Scene, SceneConfig, Scheduler, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, fixed tick delta, total ticks
/// - [`AgentStore`]: the level's initial population, e.g. from
///   [`adv_agent::AgentStoreBuilder`]
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                         |
/// |------------------------|---------------------------------|
/// | `.behavior_config(c)`  | `BehaviorConfig::default()`     |
/// | `.scene_config(c)`     | `SceneConfig::default()`        |
/// | `.sight(s)`            | none: nothing is visible        |
///
/// # Example
///
/// ```rust,ignore
/// let (store, _) = AgentStoreBuilder::new().agents(level).build();
/// let mut sim = SimBuilder::new(config, store)
///     .sight(WallIndex::new(walls)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:          SimConfig,
    agents:          AgentStore,
    behavior_config: BehaviorConfig,
    scene_config:    SceneConfig,
    sight:           Option<Box<dyn LineOfSight>>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, agents: AgentStore) -> Self {
        Self {
            config,
            agents,
            behavior_config: BehaviorConfig::default(),
            scene_config:    SceneConfig::default(),
            sight:           None,
        }
    }

    pub fn behavior_config(mut self, config: BehaviorConfig) -> Self {
        self.behavior_config = config;
        self
    }

    pub fn scene_config(mut self, config: SceneConfig) -> Self {
        self.scene_config = config;
        self
    }

    /// Supply the line-of-sight collaborator.
    ///
    /// Without one, chasers never find a target and caves only spawn on
    /// their cooldown.
    pub fn sight(mut self, sight: impl LineOfSight + 'static) -> Self {
        self.sight = Some(Box::new(sight));
        self
    }

    /// Validate every configuration, register a behavior for each agent in
    /// the store, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        let dt = self.config.tick_delta_secs;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::Config(format!(
                "tick_delta_secs must be a positive number, got {dt}"
            )));
        }
        self.behavior_config.validate()?;
        self.scene_config.validate()?;

        let mut scheduler = Scheduler::new(self.behavior_config);
        let adopted = scheduler.adopt_all(&self.agents);
        let scene = Scene::new(self.scene_config, &self.agents);
        debug!(agents = self.agents.len(), controllers = adopted, "simulation built");

        Ok(Sim {
            clock:     SimClock::new(),
            rng:       SimRng::new(self.config.seed),
            config:    self.config,
            agents:    self.agents,
            scheduler,
            scene,
            sight:     self.sight,
        })
    }
}
