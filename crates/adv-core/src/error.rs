//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `AdvError` where they
//! need to surface one of these.

use thiserror::Error;

use crate::AgentHandle;

/// The common base error for `adv-*` crates.
#[derive(Debug, Error)]
pub enum AdvError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentHandle),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `adv-core`.
pub type AdvResult<T> = Result<T, AdvError>;
