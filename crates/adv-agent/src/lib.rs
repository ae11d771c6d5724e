//! `adv-agent` — agent storage for the adventure AI simulation.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`kind`]    | `AgentKind` and its capability queries                      |
//! | [`spec`]    | `AgentSpec` — fluent description of an agent to insert      |
//! | [`store`]   | `AgentStore` (generational SoA arena), `AgentView` snapshot |
//! | [`builder`] | `AgentStoreBuilder` (level setup in one expression)         |
//!
//! # Ownership
//!
//! The scene owns the `AgentStore`.  Behaviors only ever see `&AgentStore`
//! and refer to other agents through [`AgentHandle`](adv_core::AgentHandle)s,
//! which stop resolving the moment their agent is despawned.

pub mod builder;
pub mod kind;
pub mod spec;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use kind::AgentKind;
pub use spec::AgentSpec;
pub use store::{AgentStore, AgentView};
