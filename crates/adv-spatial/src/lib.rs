//! `adv-spatial` — the visibility collaborator behaviors consult.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`sight`] | `LineOfSight` trait, `OpenField`, `SightFn` closure adapter  |
//! | [`walls`] | `Wall`, `WallIndex` — R-tree of wall segments that block rays |
//! | [`error`] | `SpatialError`, `SpatialResult<T>`                           |

pub mod error;
pub mod sight;
pub mod walls;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use sight::{LineOfSight, OpenField, SightFn};
pub use walls::{Wall, WallIndex};
