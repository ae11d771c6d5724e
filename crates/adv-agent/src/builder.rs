//! Fluent builder for a level's initial population.
//!
//! # Usage
//!
//! ```rust
//! use adv_agent::{AgentKind, AgentSpec, AgentStoreBuilder};
//! use adv_core::Point2;
//!
//! let (store, handles) = AgentStoreBuilder::new()
//!     .agent(AgentSpec::new(AgentKind::Warrior, Point2::new(0.0, 0.0)))
//!     .agent(AgentSpec::new(AgentKind::Cave, Point2::new(800.0, 0.0)))
//!     .build();
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(handles.len(), 2);
//! ```

use adv_core::AgentHandle;

use crate::{AgentSpec, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Agents are inserted in the order they were added, so handle `i` of the
/// returned list is the `i`-th spec and slot `i` of the store.
#[derive(Default)]
pub struct AgentStoreBuilder {
    specs: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one agent.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.specs.push(spec);
        self
    }

    /// Queue many agents.
    pub fn agents(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Construct the store and return the handles in insertion order.
    pub fn build(self) -> (AgentStore, Vec<AgentHandle>) {
        let mut store = AgentStore::new();
        let handles = self.specs.into_iter().map(|spec| store.insert(spec)).collect();
        (store, handles)
    }
}
