//! Strongly typed identifiers and generation-checked handles.
//!
//! `AgentId` is a raw arena slot index.  Slots are reused once an agent is
//! despawned, so anything that outlives a tick (a behavior's target, a
//! spawned goblin's owning cave) must hold an [`AgentHandle`] instead: the
//! slot index plus the generation the slot had when the handle was minted.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an agent slot in the arena.
    pub struct AgentId(u32);
}

// ── AgentHandle ───────────────────────────────────────────────────────────────

/// A non-owning, generation-checked reference to an agent.
///
/// Resolving a handle through `AgentStore::get` fails once the agent has been
/// despawned, even if the slot now holds a different agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentHandle {
    pub id:         AgentId,
    pub generation: u32,
}

impl AgentHandle {
    #[inline]
    pub fn new(id: AgentId, generation: u32) -> Self {
        Self { id, generation }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.id.index()
    }
}

impl fmt::Display for AgentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.id.0, self.generation)
    }
}
