//! `adv-sim` — scheduler, reference scene, and tick loop.
//!
//! # Tick loop
//!
//! ```text
//! each tick (dt = effective frame delta):
//!   ① Intents — Scheduler::tick: prune dead controllers, clear stale
//!               targets, build SimContext, run behaviors in creation order.
//!   ② Apply   — Scene::apply: intents in emission order
//!                 MoveToward(p)  → step toward p
//!                 FaceToward(p)  → heading + aim point
//!                 Attack         → damage hero at the aim point
//!                 GenerateSpawn  → goblin at the cave mouth
//!   ③ Reap    — despawn corpses whose linger time has elapsed.
//!   ④ Clock   — advance tick and elapsed seconds.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use adv_agent::{AgentKind, AgentSpec, AgentStoreBuilder};
//! use adv_core::{Point2, SimConfig};
//! use adv_sim::{NoopObserver, SimBuilder};
//! use adv_spatial::OpenField;
//!
//! let (store, _) = AgentStoreBuilder::new()
//!     .agent(AgentSpec::new(AgentKind::Warrior, Point2::new(0.0, 0.0)))
//!     .agent(AgentSpec::new(AgentKind::Cave, Point2::new(800.0, 0.0)))
//!     .build();
//! let mut sim = SimBuilder::new(SimConfig::default(), store)
//!     .sight(OpenField)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scene;
pub mod scheduler;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use scene::{Scene, SceneConfig, TickReport};
pub use scheduler::Scheduler;
pub use sim::Sim;
