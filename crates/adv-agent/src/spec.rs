//! `AgentSpec` — everything needed to insert one agent into the arena.

use adv_core::{AgentHandle, Point2};

use crate::kind::{AgentKind, FULL_HEALTH};

/// Initial state of a new agent.
///
/// `AgentSpec::new` fills in the per-kind defaults; the setters override
/// individual fields.
///
/// ```rust
/// use adv_agent::{AgentKind, AgentSpec};
/// use adv_core::Point2;
///
/// let boss = AgentSpec::new(AgentKind::Boss, Point2::new(100.0, 0.0)).health(250.0);
/// assert_eq!(boss.collision_radius, 40.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub kind:             AgentKind,
    pub position:         Point2,
    pub collision_radius: f32,
    pub health:           f32,
    pub movement_speed:   f32,
    /// Facing angle in radians.
    pub heading:          f32,
    /// The spawner that generated this agent, if any.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub owner:            Option<AgentHandle>,
}

impl AgentSpec {
    pub fn new(kind: AgentKind, position: Point2) -> Self {
        Self {
            kind,
            position,
            collision_radius: kind.default_collision_radius(),
            health:           FULL_HEALTH,
            movement_speed:   kind.default_movement_speed(),
            heading:          0.0,
            owner:            None,
        }
    }

    pub fn collision_radius(mut self, radius: f32) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    pub fn heading(mut self, radians: f32) -> Self {
        self.heading = radians;
        self
    }

    pub fn owner(mut self, owner: AgentHandle) -> Self {
        self.owner = Some(owner);
        self
    }
}
