//! `adv-behavior` — per-agent decision logic and the intents it produces.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum, `TickIntents` ordered output of one tick           |
//! | [`context`] | `SimContext<'a>` — read-only tick snapshot, `SpawnCensus`         |
//! | [`model`]   | `BehaviorModel` trait, `Behavior` closed enum                     |
//! | [`chase`]   | `ChaseBehavior` — find the nearest visible hero, chase or attack  |
//! | [`spawn`]   | `SpawnBehavior` — throttled goblin generation from a cave         |
//! | [`config`]  | `BehaviorConfig`, `ChaseConfig`, `SpawnConfig`                    |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                              |
//!
//! # Design notes
//!
//! A tick has two phases, driven by `adv-sim`:
//!
//! 1. **Intent phase**: every behavior reads the same pre-tick snapshot
//!    through `&SimContext` and returns intents.  Behaviors mutate only
//!    their own state (target, cooldown).
//!
//! 2. **Apply phase**: the scene consumes the collected intents and mutates
//!    the `AgentStore`.
//!
//! No decision made in phase 1 can observe another decision of the same
//! tick, so the evaluation order never changes the outcome.

pub mod chase;
pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod model;
pub mod spawn;


pub use chase::{ChaseBehavior, ChaseState};
pub use config::{BehaviorConfig, ChaseConfig, SpawnConfig};
pub use context::{SimContext, SpawnCensus};
pub use error::{BehaviorError, BehaviorResult};
pub use intent::{Intent, TickIntents};
pub use model::{Behavior, BehaviorModel};
pub use spawn::SpawnBehavior;
