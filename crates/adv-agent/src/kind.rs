//! Agent kinds and their per-kind defaults.
//!
//! Behaviors never match on a concrete kind.  They ask capability questions
//! (`is_hero_like`, `is_spawner`) so new hero classes or spawner types slot
//! in without touching AI code.

/// Base collision radius shared by every walking character.
pub const CHARACTER_COLLISION_RADIUS: f32 = 40.0;

/// Collision radius of a goblin cave.
pub const CAVE_COLLISION_RADIUS: f32 = 90.0;

/// Base movement speed in world units per second.
pub const BASE_MOVEMENT_SPEED: f32 = 200.0;

/// Starting health of every agent.
pub const FULL_HEALTH: f32 = 100.0;

/// What an agent is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentKind {
    /// Melee hero.
    Warrior,
    /// Ranged hero.
    Archer,
    /// Small enemy generated by a cave.
    Goblin,
    /// Level boss; chases like a goblin with a longer reach.
    Boss,
    /// Static goblin spawner.
    Cave,
}

impl AgentKind {
    /// `true` for agents that enemies hunt.
    #[inline]
    pub fn is_hero_like(self) -> bool {
        matches!(self, AgentKind::Warrior | AgentKind::Archer)
    }

    /// `true` for agents that generate other agents.
    #[inline]
    pub fn is_spawner(self) -> bool {
        matches!(self, AgentKind::Cave)
    }

    pub fn default_collision_radius(self) -> f32 {
        match self {
            AgentKind::Cave => CAVE_COLLISION_RADIUS,
            _               => CHARACTER_COLLISION_RADIUS,
        }
    }

    pub fn default_movement_speed(self) -> f32 {
        match self {
            AgentKind::Cave => 0.0,
            AgentKind::Boss => BASE_MOVEMENT_SPEED * 0.35,
            _               => BASE_MOVEMENT_SPEED,
        }
    }

    /// Seconds a dead agent stays in the scene before it is despawned.
    ///
    /// `None` means the body is never removed (a destroyed cave stays as
    /// wreckage).
    pub fn corpse_linger_secs(self) -> Option<f32> {
        match self {
            AgentKind::Goblin                      => Some(1.75),
            AgentKind::Boss                        => Some(5.0),
            AgentKind::Warrior | AgentKind::Archer => Some(0.0),
            AgentKind::Cave                        => None,
        }
    }

    /// Lowercase label, useful for log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Warrior => "warrior",
            AgentKind::Archer  => "archer",
            AgentKind::Goblin  => "goblin",
            AgentKind::Boss    => "boss",
            AgentKind::Cave    => "cave",
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
