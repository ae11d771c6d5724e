//! `adv-core` — foundational types for the adventure AI simulation.
//!
//! This crate is a dependency of every other `adv-*` crate.  It has no
//! `adv-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `AgentHandle` (index + generation)          |
//! | [`geo`]     | `Point2`, planar distance and heading helpers          |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                        |
//! | [`rng`]     | `SimRng` (scene-level randomness)                      |
//! | [`error`]   | `AdvError`, `AdvResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AdvError, AdvResult};
pub use geo::Point2;
pub use ids::{AgentHandle, AgentId};
pub use rng::SimRng;
pub use time::{MAX_FRAME_DELTA_SECS, MIN_UPDATE_INTERVAL_SECS, SimClock, SimConfig, Tick};
